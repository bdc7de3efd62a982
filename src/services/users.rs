use crate::{
    db::users as db_users,
    error::AppError,
    models::user::*,
    services::{validate_email, validate_text, MAX_DISPLAY_NAME_LENGTH},
};
use sqlx::SqlitePool;

pub async fn create_user(pool: &SqlitePool, req: &CreateUserRequest) -> Result<User, AppError> {
    // Validate input
    validate_email(&req.email)?;
    validate_text("display_name", &req.display_name, MAX_DISPLAY_NAME_LENGTH)?;

    let mut tx = pool.begin().await?;

    // Check if email already exists
    if db_users::find_by_email(&mut tx, &req.email).await?.is_some() {
        return Err(AppError::Conflict("User with this email already exists".to_string()));
    }

    let user = db_users::insert_user(&mut tx, &req.email, &req.display_name).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "user created");
    Ok(user)
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User, AppError> {
    let mut conn = pool.acquire().await?;
    db_users::find_by_id(&mut conn, id)
        .await?
        .ok_or(AppError::NotFound("User"))
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
    let mut conn = pool.acquire().await?;
    db_users::list_users(&mut conn).await
}

pub async fn update_user(pool: &SqlitePool, id: i64, patch: &UserPatch) -> Result<User, AppError> {
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    if let Some(display_name) = &patch.display_name {
        validate_text("display_name", display_name, MAX_DISPLAY_NAME_LENGTH)?;
    }

    let mut tx = pool.begin().await?;

    let mut user = db_users::find_by_id(&mut tx, id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    // Email must stay unique across all other users
    if let Some(email) = &patch.email {
        if let Some(existing) = db_users::find_by_email(&mut tx, email).await? {
            if existing.id != id {
                return Err(AppError::Conflict(
                    "User with this email already exists".to_string(),
                ));
            }
        }
    }

    patch.apply_to(&mut user);
    db_users::update_user(&mut tx, &user).await?;
    tx.commit().await?;

    tracing::info!(user_id = id, "user updated");
    Ok(user)
}

/// 사용자를 삭제하고 삭제한 ID를 돌려줍니다. 소유한 항목/태그도 함께 삭제됩니다.
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;
    if !db_users::delete_user(&mut tx, id).await? {
        return Err(AppError::NotFound("User"));
    }
    tx.commit().await?;

    tracing::info!(user_id = id, "user deleted");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn req(email: &str, name: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            display_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_user() {
        let pool = db::connect_in_memory().await.unwrap();
        let created = create_user(&pool, &req("alice@example.com", "Alice")).await.unwrap();
        let fetched = get_user(&pool, created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let pool = db::connect_in_memory().await.unwrap();
        create_user(&pool, &req("alice@example.com", "Alice")).await.unwrap();

        let err = create_user(&pool, &req("alice@example.com", "Other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let pool = db::connect_in_memory().await.unwrap();
        create_user(&pool, &req("alice@example.com", "Alice")).await.unwrap();
        assert!(create_user(&pool, &req("Alice@example.com", "Alice 2")).await.is_ok());
    }

    #[tokio::test]
    async fn partial_update_keeps_unset_fields() {
        let pool = db::connect_in_memory().await.unwrap();
        let created = create_user(&pool, &req("alice@example.com", "Alice")).await.unwrap();

        let patch = UserPatch {
            display_name: Some("Alicia".to_string()),
            ..Default::default()
        };
        let updated = update_user(&pool, created.id, &patch).await.unwrap();
        assert_eq!(updated.display_name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(get_user(&pool, created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_email_rechecks_uniqueness() {
        let pool = db::connect_in_memory().await.unwrap();
        let alice = create_user(&pool, &req("alice@example.com", "Alice")).await.unwrap();
        create_user(&pool, &req("bob@example.com", "Bob")).await.unwrap();

        let taken = UserPatch {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        let err = update_user(&pool, alice.id, &taken).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // 자기 자신의 이메일로 다시 설정하는 것은 허용
        let same = UserPatch {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        assert!(update_user(&pool, alice.id, &same).await.is_ok());
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let pool = db::connect_in_memory().await.unwrap();
        assert!(matches!(get_user(&pool, 42).await, Err(AppError::NotFound("User"))));
        assert!(matches!(delete_user(&pool, 42).await, Err(AppError::NotFound("User"))));
        assert!(matches!(
            update_user(&pool, 42, &UserPatch::default()).await,
            Err(AppError::NotFound("User"))
        ));
    }

    #[tokio::test]
    async fn delete_returns_id() {
        let pool = db::connect_in_memory().await.unwrap();
        let created = create_user(&pool, &req("alice@example.com", "Alice")).await.unwrap();
        assert_eq!(delete_user(&pool, created.id).await.unwrap(), created.id);
        assert!(list_users(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_writing() {
        let pool = db::connect_in_memory().await.unwrap();
        let err = create_user(&pool, &req("not-an-email", "Alice")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = create_user(&pool, &req("a@example.com", "  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(list_users(&pool).await.unwrap().is_empty());
    }
}
