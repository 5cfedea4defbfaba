// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::auto_add::{AutoAddMultiSelectField, AutoAddSelectField};
use super::field::{
    check_choice, checkbox, overwrite_text, select_choices, FieldKind, FieldView, FormErrors,
};
use super::form_data::FormData;
use crate::domain::models::field_value::{FieldMap, FieldValue};
use crate::domain::models::label::{Category, Tag};
use crate::domain::models::post::Post;
use crate::domain::repositories::label_repository::LabelLookup;
use crate::domain::repositories::RepositoryError;
use validator::{Validate, ValidationError};

/// 文章可选语言
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("zh", "Chinese")];

fn validate_lang(lang: &str) -> Result<(), ValidationError> {
    check_choice(LANGUAGES, lang)
}

/// 文章编辑表单
///
/// 分类和标签为自动新增字段，提交后即绑定为实体
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub title: String,
    pub description: String,
    pub image: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub author: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub slug: String,
    pub category: AutoAddSelectField<Category>,
    pub tags: AutoAddMultiSelectField<Tag>,
    pub content: String,
    #[validate(custom(function = "validate_lang"))]
    pub lang: String,
    /// 开启评论
    pub comment: bool,
    pub is_draft: bool,
    pub csrf_token: Option<String>,
}

impl PostForm {
    /// 空白表单
    pub fn new(default_lang: &str) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image: String::new(),
            author: String::new(),
            slug: String::new(),
            category: AutoAddSelectField::new("category", "Category", "text"),
            tags: AutoAddMultiSelectField::new("tags", "Tags", "text"),
            content: String::new(),
            lang: default_lang.to_string(),
            comment: true,
            is_draft: false,
            csrf_token: None,
        }
    }

    /// 以已有文章预填
    pub fn from_post(post: &Post) -> Self {
        let mut form = Self::new(&post.lang);
        form.title = post.title.clone();
        form.description = post.description.clone();
        form.image = post.image.clone();
        form.author = post.author.clone();
        form.slug = post.slug.clone();
        form.content = post.content.clone();
        form.comment = post.comment;
        form.is_draft = post.is_draft;
        form.category.set_data(post.category.clone());
        form.tags.set_data(post.tags.clone());
        form
    }

    /// 读取提交数据并解析分类、标签
    pub async fn process(
        &mut self,
        formdata: &FormData,
        categories: &dyn LabelLookup<Category>,
        tags: &dyn LabelLookup<Tag>,
    ) -> Result<(), RepositoryError> {
        overwrite_text(&mut self.title, formdata, "title");
        overwrite_text(&mut self.description, formdata, "description");
        overwrite_text(&mut self.image, formdata, "image");
        overwrite_text(&mut self.author, formdata, "author");
        overwrite_text(&mut self.slug, formdata, "slug");
        overwrite_text(&mut self.content, formdata, "content");
        overwrite_text(&mut self.lang, formdata, "lang");
        self.comment = checkbox(formdata, "comment");
        self.is_draft = checkbox(formdata, "is_draft");
        self.csrf_token = formdata.get("csrf_token").map(str::to_string);

        self.category.process(formdata, categories).await?;
        self.tags.process(formdata, tags).await
    }

    /// 从查询参数预填分类与语言，分类不必已存在
    pub async fn apply_hint(
        &mut self,
        cat: &str,
        lang: &str,
        categories: &dyn LabelLookup<Category>,
    ) -> Result<(), RepositoryError> {
        self.category.bind_label(cat, categories).await?;
        self.lang = lang.to_string();
        Ok(())
    }

    pub fn validate_form(&self) -> FormErrors {
        FormErrors::from_result(self.validate())
    }

    /// 表单数据，包含 `csrf_token`（若提交）
    pub fn data(&self) -> FieldMap {
        let mut data = FieldMap::new();
        let texts = [
            ("title", &self.title),
            ("description", &self.description),
            ("image", &self.image),
            ("author", &self.author),
            ("slug", &self.slug),
            ("content", &self.content),
            ("lang", &self.lang),
        ];
        for (key, value) in texts {
            data.insert(key.to_string(), FieldValue::Text(value.clone()));
        }
        data.insert("comment".to_string(), FieldValue::Bool(self.comment));
        data.insert("is_draft".to_string(), FieldValue::Bool(self.is_draft));
        data.insert(
            "category".to_string(),
            FieldValue::Category(self.category.data().cloned()),
        );
        data.insert(
            "tags".to_string(),
            FieldValue::Tags(self.tags.data().to_vec()),
        );
        if let Some(token) = &self.csrf_token {
            data.insert("csrf_token".to_string(), FieldValue::Text(token.clone()));
        }
        data
    }

    pub async fn fields(
        &self,
        errors: &FormErrors,
        categories: &dyn LabelLookup<Category>,
        tags: &dyn LabelLookup<Tag>,
    ) -> Result<Vec<FieldView>, RepositoryError> {
        Ok(vec![
            FieldView::text("title", "Title", &self.title)
                .attr("placeholder", "Title goes here")
                .required()
                .errors_from(errors),
            FieldView::text("description", "Subtitle", &self.description)
                .attr("placeholder", "A simple description of the post")
                .errors_from(errors),
            FieldView::text("image", "Header Image URL", &self.image).errors_from(errors),
            FieldView::text("author", "Author", &self.author)
                .required()
                .errors_from(errors),
            FieldView::text("slug", "URL Name", &self.slug)
                .required()
                .errors_from(errors),
            self.category
                .view(categories)
                .await?
                .attr("data-role", "select2")
                .errors_from(errors),
            self.tags
                .view(tags)
                .await?
                .attr("data-role", "select2")
                .errors_from(errors),
            FieldView::new(
                "content",
                "Content",
                FieldKind::TextArea {
                    value: self.content.clone(),
                },
            )
            .attr("data-role", "mdeditor"),
            FieldView::new(
                "lang",
                "Language",
                FieldKind::Select {
                    choices: select_choices(LANGUAGES, &self.lang),
                },
            )
            .errors_from(errors),
            FieldView::new(
                "comment",
                "Enable Comment",
                FieldKind::Checkbox {
                    checked: self.comment,
                },
            ),
            FieldView::new(
                "is_draft",
                "Save as Draft",
                FieldKind::Checkbox {
                    checked: self.is_draft,
                },
            ),
        ])
    }
}
