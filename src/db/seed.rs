//! 데모 데이터 삽입 (`SEED_DEMO_DATA=true`)
//!
//! 사용자가 한 명이라도 있으면 아무것도 하지 않습니다.

use sqlx::SqlitePool;

use crate::{
    db::{items, tags, users},
    error::AppError,
    models::*,
};

struct SeedItem {
    title: &'static str,
    kind: ItemKind,
    status: ItemStatus,
    priority: ItemPriority,
    notes: &'static str,
    tags: &'static [&'static str],
}

struct SeedUser {
    email: &'static str,
    display_name: &'static str,
    tags: &'static [&'static str],
    items: &'static [SeedItem],
}

const DEMO_USERS: &[SeedUser] = &[
    SeedUser {
        email: "melinoe@example.com",
        display_name: "Melinoe",
        tags: &["work", "learning", "important", "hobby"],
        items: &[
            SeedItem {
                title: "Shallow Blue Earth",
                kind: ItemKind::Book,
                status: ItemStatus::Reading,
                priority: ItemPriority::High,
                notes: "Читаю по вечерам, осталось ~30%.",
                tags: &["important", "learning"],
            },
            SeedItem {
                title: "Deep Green Sky",
                kind: ItemKind::Book,
                status: ItemStatus::Planned,
                priority: ItemPriority::Normal,
                notes: "В очередь после Shallow Blue Earth.",
                tags: &["work"],
            },
            SeedItem {
                title: "FastAPI Official Tutorial",
                kind: ItemKind::Article,
                status: ItemStatus::Reading,
                priority: ItemPriority::High,
                notes: "Разобраться с зависимостями и background tasks.",
                tags: &["learning"],
            },
            SeedItem {
                title: "Мифы Древней Греции и Древнего Рима",
                kind: ItemKind::Article,
                status: ItemStatus::Done,
                priority: ItemPriority::Low,
                notes: "Просто для интереса, уже прочитано.",
                tags: &["hobby"],
            },
            SeedItem {
                title: "М. Елизаров - Земля",
                kind: ItemKind::Book,
                status: ItemStatus::Planned,
                priority: ItemPriority::Normal,
                notes: "Хочу прочитать в этом году.",
                tags: &["important", "work"],
            },
        ],
    },
    SeedUser {
        email: "zagreus@example.com",
        display_name: "Zagreus",
        tags: &["reading", "later"],
        items: &[
            SeedItem {
                title: "Е. Водолазкин - Лавр",
                kind: ItemKind::Article,
                status: ItemStatus::Planned,
                priority: ItemPriority::Low,
                notes: "Читаю в свободное время",
                tags: &["reading"],
            },
            SeedItem {
                title: "Почему Тарковский - гений?",
                kind: ItemKind::Book,
                status: ItemStatus::Planned,
                priority: ItemPriority::Low,
                notes: "Когда-нибудь потом.",
                tags: &["later"],
            },
        ],
    },
];

/// 데모 사용자/태그/항목을 한 트랜잭션으로 넣습니다. 삽입했으면 `true`.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    if users::count_users(&mut tx).await? > 0 {
        tracing::info!("seed: users already exist, skipping");
        return Ok(false);
    }

    for seed in DEMO_USERS {
        let user = users::insert_user(&mut tx, seed.email, seed.display_name).await?;

        let mut tag_ids = Vec::with_capacity(seed.tags.len());
        for name in seed.tags {
            let tag = tags::insert_tag(&mut tx, user.id, name).await?;
            tag_ids.push((*name, tag.id));
        }

        for entry in seed.items {
            let req = CreateItemRequest {
                title: entry.title.to_string(),
                kind: entry.kind,
                status: entry.status,
                priority: entry.priority,
                notes: Some(entry.notes.to_string()),
                tag_ids: None,
            };
            let item = items::insert_item(&mut tx, user.id, &req).await?;

            let linked: Vec<i64> = tag_ids
                .iter()
                .filter(|(name, _)| entry.tags.contains(name))
                .map(|(_, id)| *id)
                .collect();
            items::add_item_tags(&mut tx, item.id, &linked).await?;
        }
    }

    tx.commit().await?;
    tracing::info!(users = DEMO_USERS.len(), "seed: demo data inserted");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn seeds_once() {
        let pool = db::connect_in_memory().await.unwrap();
        assert!(seed_demo_data(&pool).await.unwrap());
        assert!(!seed_demo_data(&pool).await.unwrap());

        let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (links,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM item_tags")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((users, items, links), (2, 7, 9));
    }

    #[tokio::test]
    async fn seeded_tags_belong_to_their_owner() {
        let pool = db::connect_in_memory().await.unwrap();
        seed_demo_data(&pool).await.unwrap();

        // 다른 사용자의 태그에 연결된 항목이 없어야 합니다.
        let (cross,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM item_tags it \
             JOIN items i ON i.id = it.item_id \
             JOIN tags t ON t.id = it.tag_id \
             WHERE i.user_id <> t.user_id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(cross, 0);
    }
}
