use crate::{
    auth::{
        hash_password, verify_password, AuthenticatedUserId, SigninRequest, SigninResponse,
        SignupRequest, TokenKeys,
    },
    error::AppError,
    models::{User, UserProfile},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user account.
///
/// Validates the payload, rejects duplicate usernames or emails, stores the
/// bcrypt hash of the password. No token is issued at signup; the client
/// signs in separately.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;

    let existing_user =
        sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE username = $1 OR email = $2")
            .bind(&signup_data.username)
            .bind(&signup_data.email)
            .fetch_optional(&**pool)
            .await?;

    if existing_user.is_some() {
        return Err(AppError::Conflict("User Already Exists".into()));
    }

    let password_hash = hash_password(&signup_data.password)?;

    sqlx::query("INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)")
        .bind(&signup_data.username)
        .bind(&signup_data.email)
        .bind(&password_hash)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User Successfully Created"
    })))
}

/// Authenticate a user and issue a bearer token.
///
/// A missing account and a wrong password are reported distinctly (404 vs
/// 401), matching the client's signin form behavior.
#[post("/signin")]
pub async fn signin(
    pool: web::Data<PgPool>,
    keys: web::Data<TokenKeys>,
    signin_data: web::Json<SigninRequest>,
) -> Result<impl Responder, AppError> {
    signin_data.validate()?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(&signin_data.email)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) => user,
        None => return Err(AppError::NotFound("User Doesn't Exist".into())),
    };

    if !verify_password(&signin_data.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Incorrect Password".into()));
    }

    let token = keys.generate_token(user.id)?;

    Ok(HttpResponse::Ok().json(SigninResponse {
        message: "User Successfully Signed In".into(),
        token,
    }))
}

/// Return the authenticated user's profile: username and email only, never
/// the password hash.
#[get("/info")]
pub async fn info(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let profile =
        sqlx::query_as::<_, UserProfile>("SELECT username, email FROM users WHERE id = $1")
            .bind(user.0)
            .fetch_optional(&**pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User Doesn't Exist".into()))?;

    Ok(HttpResponse::Ok().json(json!({ "user": profile })))
}
