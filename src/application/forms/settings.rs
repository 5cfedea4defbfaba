// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::field::{check_choice, overwrite_text, select_choices, FieldKind, FieldView, FormErrors};
use super::form_data::FormData;
use crate::domain::models::field_value::{FieldMap, FieldValue};
use crate::domain::models::site_settings::{SiteSettings, SocialLink};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// 站点可选语言
pub const LOCALES: &[(&str, &str)] = &[("en", "English"), ("zh_Hans_CN", "Chinese")];

const SOCIAL_LINK_PREFIX: &str = "sociallinks-";

fn validate_locale(locale: &str) -> Result<(), ValidationError> {
    check_choice(LOCALES, locale)
}

/// 社交链接子表单，三项均必填
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct SocialLinkForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub icon: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub link: String,
}

impl SocialLinkForm {
    fn is_blank(&self) -> bool {
        self.name.is_empty() && self.icon.is_empty() && self.link.is_empty()
    }
}

impl From<&SocialLink> for SocialLinkForm {
    fn from(link: &SocialLink) -> Self {
        Self {
            name: link.name.clone(),
            icon: link.icon.clone(),
            link: link.link.clone(),
        }
    }
}

impl From<SocialLinkForm> for SocialLink {
    fn from(form: SocialLinkForm) -> Self {
        Self {
            name: form.name,
            icon: form.icon,
            link: form.link,
        }
    }
}

/// 站点设置表单
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SettingsForm {
    pub name: String,
    pub description: String,
    pub avatar: String,
    pub cover_url: String,
    #[validate(custom(function = "validate_locale"))]
    pub locale: String,
    pub google_site_verification: String,
    #[validate(nested)]
    pub sociallinks: Vec<SocialLinkForm>,
    pub csrf_token: Option<String>,
}

impl SettingsForm {
    /// 以当前站点设置预填
    pub fn from_site(site: &SiteSettings) -> Self {
        Self {
            name: site.name.clone(),
            description: site.description.clone(),
            avatar: site.avatar.clone(),
            cover_url: site.cover_url.clone(),
            locale: site.locale.clone(),
            google_site_verification: site.google_site_verification.clone(),
            sociallinks: site.sociallinks.iter().map(SocialLinkForm::from).collect(),
            csrf_token: None,
        }
    }

    /// 读取提交数据
    ///
    /// 提交了的文本字段覆盖原值；提交中含社交链接条目时整体替换，
    /// 按 `sociallinks-<序号>-<字段>` 的序号排序，三项全空的条目被丢弃
    pub fn process(&mut self, formdata: &FormData) {
        overwrite_text(&mut self.name, formdata, "name");
        overwrite_text(&mut self.description, formdata, "description");
        overwrite_text(&mut self.avatar, formdata, "avatar");
        overwrite_text(&mut self.cover_url, formdata, "cover_url");
        overwrite_text(&mut self.locale, formdata, "locale");
        overwrite_text(
            &mut self.google_site_verification,
            formdata,
            "google_site_verification",
        );
        self.csrf_token = formdata.get("csrf_token").map(str::to_string);
        if formdata.keys().any(|key| key.starts_with(SOCIAL_LINK_PREFIX)) {
            self.sociallinks = parse_social_links(formdata);
        }
    }

    pub fn validate_form(&self) -> FormErrors {
        FormErrors::from_result(self.validate())
    }

    /// 表单数据，包含 `csrf_token`（若提交）
    pub fn data(&self) -> FieldMap {
        let mut data = FieldMap::new();
        let texts = [
            ("name", &self.name),
            ("description", &self.description),
            ("avatar", &self.avatar),
            ("cover_url", &self.cover_url),
            ("locale", &self.locale),
            ("google_site_verification", &self.google_site_verification),
        ];
        for (key, value) in texts {
            data.insert(key.to_string(), FieldValue::Text(value.clone()));
        }
        data.insert(
            "sociallinks".to_string(),
            FieldValue::SocialLinks(
                self.sociallinks
                    .iter()
                    .cloned()
                    .map(SocialLink::from)
                    .collect(),
            ),
        );
        if let Some(token) = &self.csrf_token {
            data.insert("csrf_token".to_string(), FieldValue::Text(token.clone()));
        }
        data
    }

    /// 渲染字段，社交链接额外附带一个空白条目用于新增
    pub fn fields(&self, errors: &FormErrors) -> Vec<FieldView> {
        let mut fields = vec![
            FieldView::text("name", "Site Name", &self.name).errors_from(errors),
            FieldView::text("description", "Site Description", &self.description)
                .errors_from(errors),
            FieldView::text("avatar", "Avatar URL", &self.avatar).errors_from(errors),
            FieldView::text("cover_url", "Cover Image URL", &self.cover_url).errors_from(errors),
            FieldView::new(
                "locale",
                "Language",
                FieldKind::Select {
                    choices: select_choices(LOCALES, &self.locale),
                },
            )
            .errors_from(errors),
            FieldView::text(
                "google_site_verification",
                "Google Site Verification Code",
                &self.google_site_verification,
            )
            .errors_from(errors),
        ];

        let blank = SocialLinkForm::default();
        let entries = self.sociallinks.iter().chain(std::iter::once(&blank));
        for (index, entry) in entries.enumerate() {
            let prefix = format!("{}{}-", SOCIAL_LINK_PREFIX, index);
            fields.push(
                FieldView::text(&format!("{}name", prefix), "Name", &entry.name)
                    .errors_from(errors),
            );
            fields.push(
                FieldView::text(&format!("{}icon", prefix), "Icon", &entry.icon)
                    .attr("placeholder", "FontAwesome short name")
                    .errors_from(errors),
            );
            fields.push(
                FieldView::text(&format!("{}link", prefix), "Link", &entry.link)
                    .errors_from(errors),
            );
        }
        fields
    }
}

fn parse_social_links(formdata: &FormData) -> Vec<SocialLinkForm> {
    let mut entries: BTreeMap<usize, SocialLinkForm> = BTreeMap::new();

    for key in formdata.keys() {
        let Some(rest) = key.strip_prefix(SOCIAL_LINK_PREFIX) else {
            continue;
        };
        let Some((index, field)) = rest.split_once('-') else {
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        let value = formdata.get(key).unwrap_or_default().to_string();
        let entry = entries.entry(index).or_default();
        match field {
            "name" => entry.name = value,
            "icon" => entry.icon = value,
            "link" => entry.link = value,
            _ => {}
        }
    }

    entries
        .into_values()
        .filter(|entry| !entry.is_blank())
        .collect()
}
