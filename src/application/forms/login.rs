// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::field::{checkbox, FieldKind, FieldView, FormErrors};
use super::form_data::FormData;
use crate::config::settings::AdminSettings;
use crate::domain::models::user::BOOTSTRAP_USERNAME;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::RepositoryError;
use subtle::ConstantTimeEq;
use validator::Validate;

pub const INVALID_USER_MESSAGE: &str = "Invalid user";
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Incorrect password";

/// 登录表单
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
    /// 记住我
    pub remember: bool,
    /// 登录成功后跳转的本地路径
    pub next: Option<String>,
    pub csrf_token: Option<String>,
}

impl LoginForm {
    pub fn from_formdata(formdata: &FormData) -> Self {
        Self {
            username: formdata.get("username").unwrap_or_default().to_string(),
            password: formdata.get("password").unwrap_or_default().to_string(),
            remember: checkbox(formdata, "remember"),
            next: formdata
                .get("next")
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            csrf_token: formdata.get("csrf_token").map(str::to_string),
        }
    }

    /// 校验表单
    ///
    /// 先做必填校验，再查询管理员记录：
    /// - 用户名不存在时，只有在尚无管理员记录且用户名为 `admin` 时继续，
    ///   此时密码须等于配置的初始密码
    /// - 用户名存在时，密码须与存储的哈希匹配
    pub async fn validate_with(
        &self,
        users: &dyn UserRepository,
        admin: &AdminSettings,
    ) -> Result<FormErrors, RepositoryError> {
        let mut errors = FormErrors::from_result(self.validate());
        if !errors.is_empty() {
            return Ok(errors);
        }

        match users.find_by_username(&self.username).await? {
            Some(user) => {
                if !user.check_password(&self.password) {
                    errors.add("password", INCORRECT_PASSWORD_MESSAGE);
                }
            }
            None => {
                if self.username != BOOTSTRAP_USERNAME || users.exists().await? {
                    errors.add("username", INVALID_USER_MESSAGE);
                } else if !bool::from(
                    self.password
                        .as_bytes()
                        .ct_eq(admin.default_password.as_bytes()),
                ) {
                    errors.add("password", INCORRECT_PASSWORD_MESSAGE);
                }
            }
        }
        Ok(errors)
    }

    pub fn fields(&self, errors: &FormErrors) -> Vec<FieldView> {
        let mut fields = vec![
            FieldView::text("username", "User Name", &self.username)
                .required()
                .errors_from(errors),
            FieldView::new("password", "Password", FieldKind::Password)
                .required()
                .errors_from(errors),
            FieldView::new(
                "remember",
                "Remember Me",
                FieldKind::Checkbox {
                    checked: self.remember,
                },
            ),
        ];
        if let Some(next) = &self.next {
            fields.push(FieldView::new(
                "next",
                "",
                FieldKind::Hidden { value: next.clone() },
            ));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::password::PasswordHasher;
    use crate::infrastructure::database::connection;
    use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
    use std::sync::Arc;

    fn admin() -> AdminSettings {
        AdminSettings {
            password_iterations: 1000,
            ..AdminSettings::default()
        }
    }

    async fn users() -> UserRepositoryImpl {
        let db = connection::in_memory().await.unwrap();
        UserRepositoryImpl::new(Arc::new(db), admin())
    }

    fn login(username: &str, password: &str) -> LoginForm {
        let data: FormData = [("username", username), ("password", password)]
            .into_iter()
            .collect();
        LoginForm::from_formdata(&data)
    }

    #[tokio::test]
    async fn test_bootstrap_admin_with_default_password() {
        let users = users().await;
        let errors = login("admin", "admin")
            .validate_with(&users, &admin())
            .await
            .unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_admin_with_other_password() {
        let users = users().await;
        let errors = login("admin", "nope")
            .validate_with(&users, &admin())
            .await
            .unwrap();
        assert_eq!(errors.get("password"), [INCORRECT_PASSWORD_MESSAGE.to_string()]);
        assert!(!errors.contains("username"));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let users = users().await;
        let errors = login("root", "admin")
            .validate_with(&users, &admin())
            .await
            .unwrap();
        assert_eq!(errors.get("username"), [INVALID_USER_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_existing_admin_password_check() {
        let users = users().await;
        let user = users.get_one().await.unwrap();
        let hash = PasswordHasher::new(1000).hash("s3cret").unwrap();
        users.update_password(user.id, &hash).await.unwrap();

        let wrong = login("admin", "admin")
            .validate_with(&users, &admin())
            .await
            .unwrap();
        assert_eq!(wrong.get("password"), [INCORRECT_PASSWORD_MESSAGE.to_string()]);

        let right = login("admin", "s3cret")
            .validate_with(&users, &admin())
            .await
            .unwrap();
        assert!(right.is_empty());
    }

    #[tokio::test]
    async fn test_required_fields_skip_store_checks() {
        let users = users().await;
        let errors = login("", "")
            .validate_with(&users, &admin())
            .await
            .unwrap();
        assert!(errors.contains("username"));
        assert!(errors.contains("password"));
        assert!(!users.exists().await.unwrap());
    }

    #[test]
    fn test_remember_and_next_parsing() {
        let data: FormData = [("username", "a"), ("remember", "y"), ("next", "/drafts")]
            .into_iter()
            .collect();
        let form = LoginForm::from_formdata(&data);
        assert!(form.remember);
        assert_eq!(form.next.as_deref(), Some("/drafts"));
    }
}
