//! One-shot user alerts.
//!
//! A handler that rejects a form (or confirms one) pushes a message and
//! redirects; the next page rendered for that browser takes the messages and
//! shows them once.

use tower_sessions::Session;

/// Session key holding pending alerts.
const ALERTS_KEY: &str = "flash_alerts";

/// Queue `message` for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn push_alert(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut alerts: Vec<String> = session.get(ALERTS_KEY).await?.unwrap_or_default();
    alerts.push(message.into());
    session.insert(ALERTS_KEY, alerts).await
}

/// Remove and return every pending alert, oldest first.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take_alerts(session: &Session) -> Result<Vec<String>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<String>>(ALERTS_KEY)
        .await?
        .unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    #[tokio::test]
    async fn test_alerts_are_taken_once_in_order() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        push_alert(&session, "请先登录后再发布商品").await.unwrap();
        push_alert(&session, "发布成功！").await.unwrap();

        assert_eq!(
            take_alerts(&session).await.unwrap(),
            ["请先登录后再发布商品", "发布成功！"]
        );
        assert!(take_alerts(&session).await.unwrap().is_empty());
    }
}
