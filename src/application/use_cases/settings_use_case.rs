// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::outcome::{FlashMessage, FormPage, Outcome, Redirect, SettingsPage, UseCaseError};
use crate::application::forms::change_password::ChangePasswordForm;
use crate::application::forms::field::FormErrors;
use crate::application::forms::form_data::FormData;
use crate::application::forms::settings::SettingsForm;
use crate::domain::repositories::site_settings_repository::SiteSettingsRepository;
use std::sync::Arc;
use tracing::info;

pub const SETTINGS_UPDATED_MESSAGE: &str = "Update settings successfully.";

/// 站点设置用例
///
/// 当前设置通过仓库显式读取，提交的字段合并进去后整体保存
pub struct SettingsUseCase {
    site: Arc<dyn SiteSettingsRepository>,
}

impl SettingsUseCase {
    pub fn new(site: Arc<dyn SiteSettingsRepository>) -> Self {
        Self { site }
    }

    /// 以当前设置预填的设置页面
    pub async fn page(&self) -> Result<SettingsPage, UseCaseError> {
        let site = self.site.load().await?;
        let form = SettingsForm::from_site(&site);
        Ok(settings_page(&form, &FormErrors::new()))
    }

    /// 处理设置提交
    pub async fn submit(&self, formdata: &FormData) -> Result<Outcome<SettingsPage>, UseCaseError> {
        let mut site = self.site.load().await?;
        let mut form = SettingsForm::from_site(&site);
        form.process(formdata);

        let errors = form.validate_form();
        if !errors.is_empty() {
            return Ok(Outcome::Render(settings_page(&form, &errors)));
        }

        let mut data = form.data();
        data.remove("csrf_token");
        site.merge(data)?;
        self.site.save(&site).await?;
        info!("Site settings updated");

        Ok(Outcome::Redirect(
            Redirect::to("/settings").with_flash(FlashMessage::success(SETTINGS_UPDATED_MESSAGE)),
        ))
    }
}

fn settings_page(form: &SettingsForm, errors: &FormErrors) -> SettingsPage {
    let password = ChangePasswordForm::default();
    SettingsPage {
        settings: FormPage {
            title: "Settings",
            action: "/settings".to_string(),
            fields: form.fields(errors),
            submit: "Save",
        },
        password: FormPage {
            title: "Change Password",
            action: "/password".to_string(),
            fields: password.fields(&FormErrors::new()),
            submit: "Update Password",
        },
    }
}
