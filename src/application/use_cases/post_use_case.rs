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

use super::outcome::{FlashMessage, FormPage, Outcome, PostListPage, Redirect, UseCaseError};
use crate::application::forms::field::FormErrors;
use crate::application::forms::form_data::FormData;
use crate::application::forms::post::PostForm;
use crate::config::settings::AdminSettings;
use crate::domain::models::label::{Category, Tag, ABOUT_CATEGORY};
use crate::domain::models::post::Post;
use crate::domain::repositories::label_repository::LabelLookup;
use crate::domain::repositories::post_repository::{PostListQuery, PostRepository};
use crate::domain::repositories::RepositoryError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

pub const POST_UPDATED_MESSAGE: &str = "Update post successfully.";
pub const POST_DELETED_MESSAGE: &str = "Delete post successfully.";

/// 文章相关的查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostQuery {
    /// 文章ID，编辑和删除时使用
    pub id: Option<String>,
    /// 分类提示
    pub cat: Option<String>,
    /// 语言提示
    pub lang: Option<String>,
}

impl PostQuery {
    /// 解析文章ID，缺失或不是整数时视为不存在
    pub fn post_id(&self) -> Result<i32, UseCaseError> {
        self.id
            .as_deref()
            .and_then(|id| id.trim().parse().ok())
            .ok_or(UseCaseError::NotFound)
    }

    fn is_about(&self) -> bool {
        self.cat.as_deref() == Some(ABOUT_CATEGORY)
    }
}

/// 列表分页参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// 从 1 开始的页码，无法解析时视为不存在
    pub fn page(&self) -> Result<u64, UseCaseError> {
        match self.page.as_deref() {
            None | Some("") => Ok(1),
            Some(raw) => raw.trim().parse().map_err(|_| UseCaseError::NotFound),
        }
    }
}

/// 文章用例：列表、新建、编辑与删除
pub struct PostUseCase {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn LabelLookup<Category>>,
    tags: Arc<dyn LabelLookup<Tag>>,
    admin: AdminSettings,
}

impl PostUseCase {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn LabelLookup<Category>>,
        tags: Arc<dyn LabelLookup<Tag>>,
        admin: AdminSettings,
    ) -> Self {
        Self {
            posts,
            categories,
            tags,
            admin,
        }
    }

    /// 按草稿状态列出文章，并统计草稿总数
    pub async fn list(&self, is_draft: bool, page: u64) -> Result<PostListPage, UseCaseError> {
        if page == 0 {
            return Err(UseCaseError::NotFound);
        }

        let posts = self
            .posts
            .list(PostListQuery {
                is_draft,
                page,
                per_page: self.admin.per_page,
            })
            .await?;
        if posts.items.is_empty() && page != 1 {
            return Err(UseCaseError::NotFound);
        }

        let draft_count = self.posts.count_drafts().await?;
        Ok(PostListPage {
            posts,
            draft_count,
            is_draft,
        })
    }

    /// “关于”页面的路由：已有该语言的关于文章则编辑它，否则新建
    async fn route_about(&self, query: &PostQuery) -> Result<Redirect, UseCaseError> {
        let lang = self.hint_lang(query);
        let redirect = match self.posts.find_about(&lang).await? {
            Some(Post { id: Some(id), .. }) => Redirect::to(format!("/edit?id={}", id)),
            _ => Redirect::to(format!(
                "/new?cat={}&lang={}",
                urlencoding::encode(ABOUT_CATEGORY),
                urlencoding::encode(&lang)
            )),
        };
        debug!("Routing about page for '{}' to {}", lang, redirect.to);
        Ok(redirect)
    }

    fn hint_lang(&self, query: &PostQuery) -> String {
        query
            .lang
            .clone()
            .unwrap_or_else(|| self.admin.hint_language.clone())
    }

    async fn load(&self, query: &PostQuery) -> Result<Post, UseCaseError> {
        let id = query.post_id()?;
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(UseCaseError::NotFound)
    }

    /// 编辑页面（GET）
    pub async fn edit_page(&self, query: &PostQuery) -> Result<Outcome<FormPage>, UseCaseError> {
        if query.is_about() {
            return Ok(Outcome::Redirect(self.route_about(query).await?));
        }
        let post = self.load(query).await?;
        let form = PostForm::from_post(&post);
        let page = self.editor_page(&form, &FormErrors::new(), post.id).await?;
        Ok(Outcome::Render(page))
    }

    /// 编辑提交（POST）
    pub async fn edit_submit(
        &self,
        query: &PostQuery,
        formdata: &FormData,
    ) -> Result<Outcome<FormPage>, UseCaseError> {
        if query.is_about() {
            return Ok(Outcome::Redirect(self.route_about(query).await?));
        }
        let mut post = self.load(query).await?;

        let mut form = PostForm::new(&self.admin.default_lang);
        form.process(formdata, self.categories.as_ref(), self.tags.as_ref())
            .await?;
        let errors = form.validate_form();
        if !errors.is_empty() {
            let page = self.editor_page(&form, &errors, post.id).await?;
            return Ok(Outcome::Render(page));
        }

        let mut data = form.data();
        data.remove("csrf_token");
        post.assign_all(data)?;
        let post = self.posts.update(&post).await?;
        info!("Updated post {:?} '{}'", post.id, post.title);

        Ok(Outcome::Redirect(
            Redirect::to("/").with_flash(FlashMessage::success(POST_UPDATED_MESSAGE)),
        ))
    }

    /// 新建页面（GET），可由 `cat`/`lang` 预填分类与语言
    pub async fn new_page(&self, query: &PostQuery) -> Result<FormPage, UseCaseError> {
        let mut form = PostForm::new(&self.admin.default_lang);
        if let Some(cat) = query.cat.as_deref().filter(|c| !c.is_empty()) {
            let lang = self.hint_lang(query);
            form.apply_hint(cat, &lang, self.categories.as_ref()).await?;
        }
        self.editor_page(&form, &FormErrors::new(), None).await
    }

    /// 新建提交（POST）
    pub async fn new_submit(&self, formdata: &FormData) -> Result<Outcome<FormPage>, UseCaseError> {
        let mut form = PostForm::new(&self.admin.default_lang);
        form.process(formdata, self.categories.as_ref(), self.tags.as_ref())
            .await?;
        let errors = form.validate_form();
        if !errors.is_empty() {
            let page = self.editor_page(&form, &errors, None).await?;
            return Ok(Outcome::Render(page));
        }

        let mut data = form.data();
        data.remove("csrf_token");
        let post = self.posts.create(&Post::from_fields(data)?).await?;
        info!("Created post {:?} '{}'", post.id, post.title);

        let message = if post.is_draft {
            format!("The draft '{}' is saved!", post.title)
        } else {
            format!("The article '{}' is posted successfully!", post.title)
        };
        Ok(Outcome::Redirect(
            Redirect::to("/").with_flash(FlashMessage::success(message)),
        ))
    }

    /// 删除文章
    pub async fn delete(&self, query: &PostQuery) -> Result<Redirect, UseCaseError> {
        let id = query.post_id()?;
        self.posts.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => UseCaseError::NotFound,
            other => UseCaseError::Repository(other),
        })?;
        info!("Deleted post {}", id);

        Ok(Redirect::to("/").with_flash(FlashMessage::success(POST_DELETED_MESSAGE)))
    }

    async fn editor_page(
        &self,
        form: &PostForm,
        errors: &FormErrors,
        id: Option<i32>,
    ) -> Result<FormPage, UseCaseError> {
        let fields = form
            .fields(errors, self.categories.as_ref(), self.tags.as_ref())
            .await?;
        let (title, action) = match id {
            Some(id) => ("Edit Post", format!("/edit?id={}", id)),
            None => ("New Post", "/new".to_string()),
        };
        Ok(FormPage {
            title,
            action,
            fields,
            submit: "Save",
        })
    }
}
