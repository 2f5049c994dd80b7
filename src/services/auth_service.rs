use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{info, warn};

use crate::api::backend::models::{LoginRequest, SignupRequest};
use crate::api::backend::BackendClient;
use crate::db;
use crate::models::Session;

const MIN_PASSWORD_LEN: usize = 4;

/// Student IDs are 5-12 ASCII digits
pub fn validate_student_id(student_id: &str) -> Result<(), String> {
    let valid_length = (5..=12).contains(&student_id.len());
    if !valid_length || !student_id.chars().all(|c| c.is_ascii_digit()) {
        return Err("❌ Student ID must be 5-12 digits".to_string());
    }
    Ok(())
}

/// `<student_id> <password> <name...>`
pub fn parse_signup_args(args: &[&str]) -> Result<SignupRequest, String> {
    if args.len() < 3 {
        return Err("❌ Usage: `$signup <student_id> <password> <name>`".to_string());
    }

    let student_id = args[0].trim();
    validate_student_id(student_id)?;

    let password = args[1];
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!("❌ Password must be at least {} characters", MIN_PASSWORD_LEN));
    }

    let name = args[2..].join(" ");
    if name.chars().count() > 32 {
        return Err("❌ Name must be 32 characters or fewer".to_string());
    }

    Ok(SignupRequest {
        student_id: student_id.to_string(),
        name,
        password: password.to_string(),
    })
}

/// `<student_id> <password>`
pub fn parse_login_args(args: &[&str]) -> Result<LoginRequest, String> {
    if args.len() != 2 {
        return Err("❌ Usage: `$login <student_id> <password>`".to_string());
    }

    let student_id = args[0].trim();
    validate_student_id(student_id)?;

    Ok(LoginRequest {
        student_id: student_id.to_string(),
        password: args[1].to_string(),
    })
}

async fn store_token(ctx: &Context, msg: &Message, student_id: &str, token: &str) -> Result<(), String> {
    let pool = super::pool(ctx).await?;
    let cipher = super::cipher(ctx).await?;

    let sealed = cipher
        .seal(token)
        .map_err(|e| format!("Failed to secure session: {}", e))?;

    db::session::store_session(&pool, msg.author.id.get() as i64, student_id, &sealed)
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// Create a game account and log the Discord user in
pub async fn signup(ctx: &Context, msg: &Message, request: SignupRequest) -> Result<String, String> {
    let backend = super::backend(ctx).await?;

    let auth = backend
        .signup(&request)
        .await
        .map_err(|e| format!("❌ Sign-up failed: {}", e.user_message()))?;

    store_token(ctx, msg, &request.student_id, &auth.token).await?;
    info!("User {} signed up as student {}", msg.author.id, request.student_id);

    Ok(request.student_id)
}

/// Log the Discord user in with existing game credentials
pub async fn login(ctx: &Context, msg: &Message, request: LoginRequest) -> Result<String, String> {
    let backend = super::backend(ctx).await?;

    let auth = backend
        .login(&request)
        .await
        .map_err(|e| format!("❌ Login failed: {}", e.user_message()))?;

    store_token(ctx, msg, &request.student_id, &auth.token).await?;
    info!("User {} logged in as student {}", msg.author.id, request.student_id);

    Ok(request.student_id)
}

/// Forget the stored token; `Ok(false)` if there was none
pub async fn logout(ctx: &Context, msg: &Message) -> Result<bool, String> {
    let pool = super::pool(ctx).await?;
    db::session::delete_session(&pool, msg.author.id.get() as i64)
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// Load and decrypt a user's session
pub async fn load_session(ctx: &Context, discord_id: i64) -> Result<Option<Session>, String> {
    let pool = super::pool(ctx).await?;

    let Some((student_id, sealed)) = db::session::get_session(&pool, discord_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?
    else {
        return Ok(None);
    };

    let cipher = super::cipher(ctx).await?;
    match cipher.open(&sealed) {
        Ok(token) => Ok(Some(Session {
            student_id,
            token,
        })),
        Err(e) => {
            // Usually a rotated SESSION_ENCRYPTION_KEY
            warn!("Dropping unreadable session for {}: {}", discord_id, e);
            db::session::delete_session(&pool, discord_id)
                .await
                .map_err(|e| format!("Database error: {}", e))?;
            Ok(None)
        }
    }
}

/// Backend client carrying the user's token; errors if not logged in
pub async fn authorized_client(ctx: &Context, msg: &Message) -> Result<(BackendClient, Session), String> {
    let session = load_session(ctx, msg.author.id.get() as i64)
        .await?
        .ok_or_else(|| "❌ You are not logged in. DM me `$login <student_id> <password>` or `$signup`.".to_string())?;

    let client = super::backend(ctx).await?.authorized(session.token.clone());
    Ok((client, session))
}

/// Backend client for read-only browsing: authorized when logged in, anonymous otherwise
pub async fn client_for(ctx: &Context, msg: &Message) -> Result<BackendClient, String> {
    let backend = super::backend(ctx).await?;
    Ok(match load_session(ctx, msg.author.id.get() as i64).await? {
        Some(session) => backend.authorized(session.token),
        None => backend,
    })
}
