// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::field::{FieldKind, FieldView, FormErrors};
use super::form_data::FormData;
use super::login::INCORRECT_PASSWORD_MESSAGE;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::RepositoryError;
use validator::Validate;

/// 修改密码表单
#[derive(Debug, Clone, Default, Validate)]
pub struct ChangePasswordForm {
    pub old: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub new: String,
    #[validate(must_match(other = "new", message = "Field must be equal to new."))]
    pub confirm: String,
    pub csrf_token: Option<String>,
}

impl ChangePasswordForm {
    pub fn from_formdata(formdata: &FormData) -> Self {
        Self {
            old: formdata.get("old").unwrap_or_default().to_string(),
            new: formdata.get("new").unwrap_or_default().to_string(),
            confirm: formdata.get("confirm").unwrap_or_default().to_string(),
            csrf_token: formdata.get("csrf_token").map(str::to_string),
        }
    }

    /// 校验表单，旧密码须与管理员当前密码匹配
    pub async fn validate_with(
        &self,
        users: &dyn UserRepository,
    ) -> Result<FormErrors, RepositoryError> {
        let mut errors = FormErrors::from_result(self.validate());
        let admin = users.get_one().await?;
        if !admin.check_password(&self.old) {
            errors.add("old", INCORRECT_PASSWORD_MESSAGE);
        }
        Ok(errors)
    }

    pub fn fields(&self, errors: &FormErrors) -> Vec<FieldView> {
        vec![
            FieldView::new("old", "Old Password", FieldKind::Password).errors_from(errors),
            FieldView::new("new", "New Password", FieldKind::Password)
                .required()
                .errors_from(errors),
            FieldView::new("confirm", "Confirm Password", FieldKind::Password)
                .errors_from(errors),
        ]
    }
}
