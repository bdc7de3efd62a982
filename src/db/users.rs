use crate::error::AppError;
use crate::models::user::User;
use sqlx::SqliteConnection;

pub async fn insert_user(
    conn: &mut SqliteConnection,
    email: &str,
    display_name: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, display_name)
        VALUES (?, ?)
        RETURNING id, email, display_name, created_at
        "#,
    )
    .bind(email)
    .bind(display_name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(user)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, display_name, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}

/// 이메일은 대소문자를 구분해 비교합니다 (BINARY collation).
pub async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, display_name, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}

pub async fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, email, display_name, created_at FROM users ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(users)
}

pub async fn count_users(conn: &mut SqliteConnection) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// 변경 가능한 컬럼(email, display_name)을 통째로 저장합니다. created_at은 건드리지 않습니다.
pub async fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET email = ?, display_name = ? WHERE id = ?")
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// 사용자의 항목과 태그는 `ON DELETE CASCADE`로 함께 삭제됩니다.
pub async fn delete_user(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
