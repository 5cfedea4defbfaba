// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::post::Post;
use async_trait::async_trait;
use serde::Serialize;

/// 文章列表查询参数
#[derive(Debug, Clone, Copy)]
pub struct PostListQuery {
    pub is_draft: bool,
    /// 从 1 开始的页码
    pub page: u64,
    pub per_page: u64,
}

/// 一页文章
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl PostPage {
    /// 总页数
    pub fn pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }
}

/// 文章仓库特质
///
/// `create`/`update` 在同一事务中级联保存未持久化的分类与标签
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 根据ID查找文章
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepositoryError>;
    /// 查找指定语言的“关于”页面文章
    async fn find_about(&self, lang: &str) -> Result<Option<Post>, RepositoryError>;
    /// 按草稿状态分页列出非“关于”分类的文章，按创建时间倒序
    async fn list(&self, query: PostListQuery) -> Result<PostPage, RepositoryError>;
    /// 草稿总数
    async fn count_drafts(&self) -> Result<u64, RepositoryError>;
    /// 创建文章，返回带ID的文章
    async fn create(&self, post: &Post) -> Result<Post, RepositoryError>;
    /// 更新文章
    async fn update(&self, post: &Post) -> Result<Post, RepositoryError>;
    /// 删除文章
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}
