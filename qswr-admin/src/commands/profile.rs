//! `profile`: the stored user, checked against the backend.

use super::Context;
use crate::error::AppError;
use crate::render;
use crate::session::StoredSession;

const SESSION_VALID: &str = "الجلسة صالحة";
const USER_MISMATCH: &str = "المستخدم على الخادم مختلف";

pub async fn run(ctx: &Context) -> Result<(), AppError> {
    let session = ctx.require_session().await?;
    let system_user = ctx.sessions.cookie("system_user").await?;
    print!("{}", format_profile(&session, system_user.as_deref()));

    match ctx.client().logged_user().await {
        Ok(user) if user == session.user.name => {
            ctx.toaster.info(SESSION_VALID, user);
            Ok(())
        }
        Ok(user) => {
            log::warn!("stored user {} but backend says {}", session.user.name, user);
            ctx.toaster.warning(USER_MISMATCH, user);
            Ok(())
        }
        // A rejected session is cleared by the caller.
        Err(e) => Err(e.into()),
    }
}

fn format_profile(session: &StoredSession, system_user: Option<&str>) -> String {
    let user = &session.user;
    render::pairs(&[
        ("الاسم", session.display_name().to_string()),
        ("المستخدم", user.name.clone()),
        ("البريد", user.email.clone().unwrap_or_else(|| "-".to_string())),
        ("الخادم", session.base_url.clone()),
        ("طريقة الدخول", session.method.as_str().to_string()),
        ("مستخدم النظام", if system_user == Some("yes") { "نعم" } else { "لا" }.to_string()),
        (
            "وقت الدخول",
            session
                .logged_in_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use frappe_lib::auth::LoginMethod;
    use frappe_lib::auth::SessionCookies;
    use frappe_lib::model::UserInfo;

    use super::*;

    #[test]
    fn test_profile_lists_user() {
        let session = StoredSession {
            base_url: "https://qswr.sa".to_string(),
            method: LoginMethod::ApiKey,
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
            sid: None,
            user: UserInfo {
                name: "sara@qswr.sa".to_string(),
                full_name: Some("سارة".to_string()),
                email: None,
            },
            cookies: SessionCookies::new(),
            logged_in_at: Utc::now(),
        };
        let text = format_profile(&session, Some("yes"));
        assert!(text.contains("سارة"));
        assert!(text.contains("sara@qswr.sa"));
        assert!(text.contains(LoginMethod::ApiKey.as_str()));
        assert!(!text.contains("secret"));
        assert!(text.contains("مستخدم النظام  نعم"));
    }
}
