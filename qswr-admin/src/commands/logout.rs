//! `logout`: end the backend session when possible, always forget it locally.

use super::Context;
use crate::error::AppError;
use crate::projects::constants::messages;

pub async fn run(ctx: &Context) -> Result<(), AppError> {
    let session = ctx.sessions.current().await?;

    if let Some(session) = &session
        && session.is_authenticated()
    {
        // The local session goes away even if the backend is unreachable.
        if let Err(e) = ctx.client().logout().await {
            log::warn!("backend logout failed: {}", e);
        }
    }

    ctx.sessions.clear().await?;
    let who = session
        .as_ref()
        .map(|s| s.display_name().to_string())
        .unwrap_or_default();
    ctx.toaster.success(messages::LOGOUT_SUCCESS, who);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use frappe_lib::auth::LoginMethod;
    use frappe_lib::auth::SessionCookies;
    use frappe_lib::model::UserInfo;

    use super::*;
    use crate::commands::testing;
    use crate::session::StoredSession;
    use crate::toast::ToastKind;

    #[tokio::test]
    async fn test_logout_without_session_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = testing::context(&dir).await;

        run(&ctx).await.unwrap();
        let toasts = ctx.toaster.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].title, messages::LOGOUT_SUCCESS);
    }

    #[tokio::test]
    async fn test_logout_clears_unusable_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = testing::context(&dir).await;

        // No sid anywhere, so no backend call is attempted.
        let session = StoredSession {
            base_url: "https://qswr.sa".to_string(),
            method: LoginMethod::Session,
            api_key: None,
            api_secret: None,
            sid: None,
            user: UserInfo {
                name: "ahmed@qswr.sa".to_string(),
                full_name: Some("أحمد".to_string()),
                email: None,
            },
            cookies: SessionCookies::new(),
            logged_in_at: Utc::now(),
        };
        ctx.sessions.save(&session).await.unwrap();

        run(&ctx).await.unwrap();
        assert!(ctx.sessions.current().await.unwrap().is_none());
        assert_eq!(ctx.toaster.drain()[0].message.as_deref(), Some("أحمد"));
    }
}
