//! `login`: password login, then cache the session.

use frappe_lib::auth::PasswordFlow;

use super::Context;
use crate::error::AppError;
use crate::projects::constants::messages;
use crate::session::StoredSession;

pub async fn run(ctx: &Context, username: &str, password: &str) -> Result<StoredSession, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Usage("username and password are required".to_string()));
    }

    log::info!("logging in to {} as {}", ctx.base_url(), username);
    let outcome = PasswordFlow::new(ctx.base_url(), username, password)
        .with_http_client(ctx.http())
        .login()
        .await?;

    let session = StoredSession::from_outcome(ctx.base_url(), &outcome);
    ctx.sessions.save(&session).await?;

    ctx.toaster.success(
        messages::LOGIN_SUCCESS,
        format!("{} ({})", session.display_name(), session.method.as_str()),
    );
    Ok(session)
}
