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

use super::outcome::{FlashMessage, FormPage, Redirect, UseCaseError};
use crate::application::forms::change_password::ChangePasswordForm;
use crate::application::forms::field::FormErrors;
use crate::application::forms::form_data::FormData;
use crate::application::forms::login::LoginForm;
use crate::config::settings::AdminSettings;
use crate::domain::models::user::User;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::password::PasswordHasher;
use std::sync::Arc;
use tracing::{info, warn};

pub const LOGGED_IN_MESSAGE: &str = "You are logged in successfully!";
pub const PASSWORD_UPDATED_MESSAGE: &str = "The password is updated!";
pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid password!";

/// 登录结果
#[derive(Debug)]
pub enum LoginResult {
    /// 校验失败，重新渲染登录表单
    Invalid(FormPage),
    /// 登录成功
    Authenticated {
        user: User,
        remember: bool,
        redirect: Redirect,
    },
}

/// 认证用例：登录与修改密码
pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    admin: AdminSettings,
}

impl AuthUseCase {
    pub fn new(users: Arc<dyn UserRepository>, admin: AdminSettings) -> Self {
        Self { users, admin }
    }

    pub fn login_page(&self, next: Option<String>) -> FormPage {
        let form = LoginForm {
            next,
            ..LoginForm::default()
        };
        login_page(&form, &FormErrors::new())
    }

    /// 处理登录提交
    ///
    /// 校验通过后获取唯一管理员；首次以 `admin` 登录时由此创建管理员记录
    pub async fn login(&self, formdata: &FormData) -> Result<LoginResult, UseCaseError> {
        let form = LoginForm::from_formdata(formdata);
        let errors = form.validate_with(self.users.as_ref(), &self.admin).await?;
        if !errors.is_empty() {
            warn!("Rejected login attempt for '{}'", form.username);
            return Ok(LoginResult::Invalid(login_page(&form, &errors)));
        }

        let user = self.users.get_one().await?;
        info!("Administrator '{}' logged in", user.username);
        let target = form
            .next
            .as_deref()
            .filter(|next| is_local_path(next))
            .unwrap_or("/");

        Ok(LoginResult::Authenticated {
            user,
            remember: form.remember,
            redirect: Redirect::to(target).with_flash(FlashMessage::success(LOGGED_IN_MESSAGE)),
        })
    }

    /// 处理修改密码提交，无论成功与否都跳转回设置页
    pub async fn change_password(&self, formdata: &FormData) -> Result<Redirect, UseCaseError> {
        let form = ChangePasswordForm::from_formdata(formdata);
        let errors = form.validate_with(self.users.as_ref()).await?;
        let redirect = Redirect::to("/settings");

        if !errors.is_empty() {
            warn!("Password change rejected");
            return Ok(redirect.with_flash(FlashMessage::danger(INVALID_PASSWORD_MESSAGE)));
        }

        let admin = self.users.get_one().await?;
        let hash = PasswordHasher::new(self.admin.password_iterations).hash(&form.new)?;
        self.users.update_password(admin.id, &hash).await?;
        info!("Password updated for '{}'", admin.username);

        Ok(redirect.with_flash(FlashMessage::success(PASSWORD_UPDATED_MESSAGE)))
    }
}

fn login_page(form: &LoginForm, errors: &FormErrors) -> FormPage {
    FormPage {
        title: "Login",
        action: "/login".to_string(),
        fields: form.fields(errors),
        submit: "Login",
    }
}

/// 只允许跳转到本站路径
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
