// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::label::{Category, Tag, ABOUT_CATEGORY};
use crate::domain::models::post::Post;
use crate::domain::repositories::post_repository::{PostListQuery, PostPage, PostRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{category, post, post_tag, tag};
use async_trait::async_trait;
use sea_orm::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 文章仓库实现
pub struct PostRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryImpl {
    /// 创建新的文章仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的文章仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// 常规列表条件：无分类，或分类不是“关于”
fn listed_condition() -> Condition {
    Condition::any()
        .add(post::Column::CategoryId.is_null())
        .add(category::Column::Text.ne(ABOUT_CATEGORY))
}

#[async_trait]
impl PostRepository for PostRepositoryImpl {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepositoryError> {
        let row = post::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(self.db.as_ref())
            .await?;

        match row {
            Some((model, category)) => {
                let mut tags = load_tags(self.db.as_ref(), &[model.id]).await?;
                let tags = tags.remove(&model.id).unwrap_or_default();
                Ok(Some(to_domain(model, category, tags)))
            }
            None => Ok(None),
        }
    }

    async fn find_about(&self, lang: &str) -> Result<Option<Post>, RepositoryError> {
        let row = post::Entity::find()
            .find_also_related(category::Entity)
            .filter(category::Column::Text.eq(ABOUT_CATEGORY))
            .filter(post::Column::Lang.eq(lang))
            .order_by_asc(post::Column::Id)
            .one(self.db.as_ref())
            .await?;

        match row {
            Some((model, category)) => {
                let mut tags = load_tags(self.db.as_ref(), &[model.id]).await?;
                let tags = tags.remove(&model.id).unwrap_or_default();
                Ok(Some(to_domain(model, category, tags)))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, query: PostListQuery) -> Result<PostPage, RepositoryError> {
        let total = post::Entity::find()
            .left_join(category::Entity)
            .filter(listed_condition())
            .filter(post::Column::IsDraft.eq(query.is_draft))
            .count(self.db.as_ref())
            .await?;

        // Page 1 always exists, even when the listing is empty
        let pages = total.div_ceil(query.per_page.max(1));
        if query.page == 0 || (query.page > pages && query.page != 1) {
            return Err(RepositoryError::NotFound);
        }
        let offset = (query.page - 1)
            .checked_mul(query.per_page)
            .ok_or(RepositoryError::NotFound)?;
        let rows = post::Entity::find()
            .find_also_related(category::Entity)
            .filter(listed_condition())
            .filter(post::Column::IsDraft.eq(query.is_draft))
            .order_by_desc(post::Column::Date)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(query.per_page)
            .all(self.db.as_ref())
            .await?;

        let ids: Vec<i32> = rows.iter().map(|(model, _)| model.id).collect();
        let mut tags = load_tags(self.db.as_ref(), &ids).await?;
        let items = rows
            .into_iter()
            .map(|(model, category)| {
                let post_tags = tags.remove(&model.id).unwrap_or_default();
                to_domain(model, category, post_tags)
            })
            .collect();

        Ok(PostPage {
            items,
            page: query.page,
            per_page: query.per_page,
            total,
        })
    }

    async fn count_drafts(&self) -> Result<u64, RepositoryError> {
        let count = post::Entity::find()
            .filter(post::Column::IsDraft.eq(true))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn create(&self, post: &Post) -> Result<Post, RepositoryError> {
        let txn = self.db.begin().await?;

        let category = persist_category(&txn, post.category.as_ref()).await?;
        let tags = persist_tags(&txn, &post.tags).await?;

        let model = post::ActiveModel {
            title: Set(post.title.clone()),
            description: Set(post.description.clone()),
            image: Set(post.image.clone()),
            author: Set(post.author.clone()),
            slug: Set(post.slug.clone()),
            content: Set(post.content.clone()),
            lang: Set(post.lang.clone()),
            comment: Set(post.comment),
            is_draft: Set(post.is_draft),
            category_id: Set(category.as_ref().and_then(|c| c.id)),
            date: Set(post.date),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        link_tags(&txn, model.id, &tags).await?;
        txn.commit().await?;

        Ok(Post {
            id: Some(model.id),
            category,
            tags,
            ..post.clone()
        })
    }

    async fn update(&self, post: &Post) -> Result<Post, RepositoryError> {
        let id = post.id.ok_or(RepositoryError::NotFound)?;
        let txn = self.db.begin().await?;

        let existing = post::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let category = persist_category(&txn, post.category.as_ref()).await?;
        let tags = persist_tags(&txn, &post.tags).await?;

        let mut model: post::ActiveModel = existing.into();
        model.title = Set(post.title.clone());
        model.description = Set(post.description.clone());
        model.image = Set(post.image.clone());
        model.author = Set(post.author.clone());
        model.slug = Set(post.slug.clone());
        model.content = Set(post.content.clone());
        model.lang = Set(post.lang.clone());
        model.comment = Set(post.comment);
        model.is_draft = Set(post.is_draft);
        model.category_id = Set(category.as_ref().and_then(|c| c.id));
        model.update(&txn).await?;

        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        link_tags(&txn, id, &tags).await?;
        txn.commit().await?;

        Ok(Post {
            category,
            tags,
            ..post.clone()
        })
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        let result = post::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }
}

/// 保存未持久化的分类，返回带ID的分类
async fn persist_category<C: ConnectionTrait>(
    conn: &C,
    category: Option<&Category>,
) -> Result<Option<Category>, DbErr> {
    let Some(category) = category else {
        return Ok(None);
    };
    if category.id.is_some() {
        return Ok(Some(category.clone()));
    }

    let model = category::ActiveModel {
        text: Set(category.text.clone()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(Some(model.into()))
}

/// 保存未持久化的标签，同一标签只保留一次
async fn persist_tags<C: ConnectionTrait>(conn: &C, tags: &[Tag]) -> Result<Vec<Tag>, DbErr> {
    let mut seen = HashSet::new();
    let mut saved = Vec::with_capacity(tags.len());

    for tag in tags {
        if !seen.insert((tag.id, tag.text.clone())) {
            continue;
        }
        if tag.id.is_some() {
            saved.push(tag.clone());
            continue;
        }
        let model = tag::ActiveModel {
            text: Set(tag.text.clone()),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        saved.push(model.into());
    }

    Ok(saved)
}

async fn link_tags<C: ConnectionTrait>(conn: &C, post_id: i32, tags: &[Tag]) -> Result<(), DbErr> {
    let mut tag_ids: Vec<i32> = tags.iter().filter_map(|t| t.id).collect();
    tag_ids.sort_unstable();
    tag_ids.dedup();
    if tag_ids.is_empty() {
        return Ok(());
    }

    let links = tag_ids.into_iter().map(|tag_id| post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
    });
    post_tag::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// 批量加载文章的标签，按标签ID排序
async fn load_tags<C: ConnectionTrait>(
    conn: &C,
    post_ids: &[i32],
) -> Result<HashMap<i32, Vec<Tag>>, DbErr> {
    let mut by_post: HashMap<i32, Vec<Tag>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(by_post);
    }

    let rows = post_tag::Entity::find()
        .find_also_related(tag::Entity)
        .filter(post_tag::Column::PostId.is_in(post_ids.to_vec()))
        .order_by_asc(post_tag::Column::TagId)
        .all(conn)
        .await?;

    for (link, tag) in rows {
        if let Some(tag) = tag {
            by_post.entry(link.post_id).or_default().push(tag.into());
        }
    }
    Ok(by_post)
}

fn to_domain(model: post::Model, category: Option<category::Model>, tags: Vec<Tag>) -> Post {
    Post {
        id: Some(model.id),
        title: model.title,
        description: model.description,
        image: model.image,
        author: model.author,
        slug: model.slug,
        content: model.content,
        lang: model.lang,
        comment: model.comment,
        is_draft: model.is_draft,
        category: category.map(Into::into),
        tags,
        date: model.date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::label::LabelEntity;
    use crate::infrastructure::database::connection;
    use chrono::{Duration, Utc};

    async fn repo() -> PostRepositoryImpl {
        let db = connection::in_memory().await.unwrap();
        PostRepositoryImpl::new(Arc::new(db))
    }

    fn sample(title: &str, is_draft: bool, category: Option<&str>, minutes_ago: i64) -> Post {
        Post {
            title: title.to_string(),
            author: "me".to_string(),
            slug: title.to_lowercase(),
            is_draft,
            category: category.map(|c| Category::transient(c.to_string())),
            date: Utc::now() - Duration::minutes(minutes_ago),
            ..Post::default()
        }
    }

    #[tokio::test]
    async fn test_create_cascades_transient_labels() {
        let repo = repo().await;
        let mut post = sample("Hello", false, Some("Rust"), 0);
        post.tags = vec![
            Tag::transient("a".to_string()),
            Tag::transient("b".to_string()),
        ];

        let saved = repo.create(&post).await.unwrap();
        let id = saved.id.unwrap();
        assert!(saved.category.as_ref().unwrap().id.is_some());
        assert!(saved.tags.iter().all(|t| t.id.is_some()));

        let loaded = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.category.unwrap().text, "Rust");
        let texts: Vec<_> = loaded.tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_reloaded_tags_follow_tag_id_order() {
        let repo = repo().await;
        let mut first = sample("First", false, None, 1);
        first.tags = vec![
            Tag::transient("rust".to_string()),
            Tag::transient("web".to_string()),
        ];
        let first = repo.create(&first).await.unwrap();

        let mut second = sample("Second", false, None, 0);
        second.tags = first.tags.iter().rev().cloned().collect();
        let saved = repo.create(&second).await.unwrap();

        let loaded = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        let texts: Vec<_> = loaded.tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["rust", "web"]);
    }

    #[tokio::test]
    async fn test_update_replaces_tags_and_keeps_date() {
        let repo = repo().await;
        let mut post = sample("Hello", true, None, 10);
        post.tags = vec![Tag::transient("old".to_string())];
        let saved = repo.create(&post).await.unwrap();

        let mut edited = saved.clone();
        edited.title = "Hello again".to_string();
        edited.is_draft = false;
        edited.tags = vec![Tag::transient("new".to_string())];
        repo.update(&edited).await.unwrap();

        let loaded = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Hello again");
        assert!(!loaded.is_draft);
        assert_eq!(loaded.tags.len(), 1);
        assert_eq!(loaded.tags[0].text, "new");
        assert_eq!(loaded.date.timestamp(), saved.date.timestamp());
    }

    #[tokio::test]
    async fn test_list_excludes_about_and_orders_by_date() {
        let repo = repo().await;
        repo.create(&sample("old", false, None, 30)).await.unwrap();
        repo.create(&sample("new", false, Some("Rust"), 1)).await.unwrap();
        repo.create(&sample("about", false, Some(ABOUT_CATEGORY), 0))
            .await
            .unwrap();
        repo.create(&sample("draft", true, None, 5)).await.unwrap();

        let published = repo
            .list(PostListQuery {
                is_draft: false,
                page: 1,
                per_page: 50,
            })
            .await
            .unwrap();
        let titles: Vec<_> = published.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);
        assert_eq!(published.total, 2);

        let drafts = repo
            .list(PostListQuery {
                is_draft: true,
                page: 1,
                per_page: 50,
            })
            .await
            .unwrap();
        assert_eq!(drafts.items.len(), 1);
        assert_eq!(repo.count_drafts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let repo = repo().await;
        for i in 0..5 {
            repo.create(&sample(&format!("p{}", i), false, None, i))
                .await
                .unwrap();
        }

        let second = repo
            .list(PostListQuery {
                is_draft: false,
                page: 2,
                per_page: 2,
            })
            .await
            .unwrap();
        let titles: Vec<_> = second.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["p2", "p3"]);
        assert_eq!(second.pages(), 3);
    }

    #[tokio::test]
    async fn test_list_rejects_pages_past_the_end() {
        let repo = repo().await;
        for i in 0..3 {
            repo.create(&sample(&format!("p{}", i), false, None, i))
                .await
                .unwrap();
        }

        for page in [0, 3, u64::MAX / 2 + 1, u64::MAX] {
            let result = repo
                .list(PostListQuery {
                    is_draft: false,
                    page,
                    per_page: 2,
                })
                .await;
            assert!(
                matches!(result, Err(RepositoryError::NotFound)),
                "page {} should be rejected",
                page
            );
        }

        let empty = repo
            .list(PostListQuery {
                is_draft: true,
                page: 1,
                per_page: 2,
            })
            .await
            .unwrap();
        assert!(empty.items.is_empty());
    }

    #[tokio::test]
    async fn test_find_about_by_language() {
        let repo = repo().await;
        let mut about = sample("About me", false, Some(ABOUT_CATEGORY), 0);
        about.lang = "zh".to_string();
        let saved = repo.create(&about).await.unwrap();

        let found = repo.find_about("zh").await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
        assert!(repo.find_about("en").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_then_lookup_fails() {
        let repo = repo().await;
        let mut post = sample("bye", false, None, 0);
        post.tags = vec![Tag::transient("t".to_string())];
        let id = repo.create(&post).await.unwrap().id.unwrap();

        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
