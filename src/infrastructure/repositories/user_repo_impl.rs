// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::AdminSettings;
use crate::domain::models::site_settings::SiteSettings;
use crate::domain::models::user::{User, BOOTSTRAP_USERNAME};
use crate::domain::repositories::site_settings_repository::SiteSettingsRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::password::PasswordHasher;
use crate::infrastructure::database::entities::user;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;
use tracing::{debug, info};

/// 管理员仓库实现
///
/// 站点设置与唯一的管理员记录存放在同一行，因此同时实现设置仓库
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
    admin: AdminSettings,
}

impl UserRepositoryImpl {
    /// 创建新的管理员仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    /// * `admin` - 后台管理配置，提供初始密码与哈希迭代次数
    pub fn new(db: Arc<DatabaseConnection>, admin: AdminSettings) -> Self {
        Self { db, admin }
    }

    async fn first(&self) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .one(self.db.as_ref())
            .await
    }

    /// 创建默认管理员账户
    ///
    /// 并发的首次登录可能同时走到这里，插入因用户名唯一约束失败时
    /// 重新读取另一方创建的账户
    async fn provision(&self) -> Result<User, RepositoryError> {
        let password_hash = PasswordHasher::new(self.admin.password_iterations)
            .hash(&self.admin.default_password)
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        let inserted = user::ActiveModel {
            username: Set(BOOTSTRAP_USERNAME.to_string()),
            password_hash: Set(password_hash),
            settings: Set(None),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await;

        match inserted {
            Ok(model) => {
                info!("Provisioned administrator account '{}'", model.username);
                Ok(model.into())
            }
            Err(err) => match self.first().await? {
                Some(model) => {
                    debug!("Administrator account was provisioned concurrently: {}", err);
                    Ok(model.into())
                }
                None => Err(err.into()),
            },
        }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn exists(&self) -> Result<bool, RepositoryError> {
        let count = user::Entity::find().count(self.db.as_ref()).await?;
        Ok(count > 0)
    }

    async fn get_one(&self) -> Result<User, RepositoryError> {
        if let Some(model) = self.first().await? {
            return Ok(model.into());
        }
        self.provision().await
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), RepositoryError> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl SiteSettingsRepository for UserRepositoryImpl {
    async fn load(&self) -> Result<SiteSettings, RepositoryError> {
        let raw = self.first().await?.and_then(|model| model.settings);
        match raw {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(SiteSettings::default()),
        }
    }

    async fn save(&self, settings: &SiteSettings) -> Result<(), RepositoryError> {
        let owner = self.get_one().await?;
        let raw = serde_json::to_string(settings)?;

        user::Entity::update_many()
            .col_expr(user::Column::Settings, Expr::value(raw))
            .filter(user::Column::Id.eq(owner.id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::site_settings::SocialLink;
    use crate::infrastructure::database::connection;

    async fn repo() -> UserRepositoryImpl {
        let db = connection::in_memory().await.unwrap();
        let admin = AdminSettings {
            password_iterations: 1000,
            ..AdminSettings::default()
        };
        UserRepositoryImpl::new(Arc::new(db), admin)
    }

    #[tokio::test]
    async fn test_get_one_provisions_admin_once() {
        let repo = repo().await;
        assert!(!repo.exists().await.unwrap());

        let first = repo.get_one().await.unwrap();
        assert_eq!(first.username, BOOTSTRAP_USERNAME);
        assert!(first.check_password("admin"));

        let second = repo.get_one().await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(repo.exists().await.unwrap());
        assert!(repo.find_by_username("admin").await.unwrap().is_some());
        assert!(repo.find_by_username("root").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_first_logins_share_one_admin() {
        let repo = repo().await;
        let (a, b) = tokio::join!(repo.get_one(), repo.get_one());
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(a.id, b.id);
        assert_eq!(user::Entity::find().count(repo.db.as_ref()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_provision_after_lost_race_returns_existing_admin() {
        let repo = repo().await;
        let existing = repo.get_one().await.unwrap();

        let again = repo.provision().await.unwrap();
        assert_eq!(again.id, existing.id);
        assert_eq!(user::Entity::find().count(repo.db.as_ref()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_password() {
        let repo = repo().await;
        let user = repo.get_one().await.unwrap();
        let hash = PasswordHasher::new(1000).hash("s3cret").unwrap();

        repo.update_password(user.id, &hash).await.unwrap();
        let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(reloaded.check_password("s3cret"));
        assert!(!reloaded.check_password("admin"));

        assert!(matches!(
            repo.update_password(user.id + 1, &hash).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let repo = repo().await;
        assert_eq!(repo.load().await.unwrap(), SiteSettings::default());

        let mut settings = SiteSettings {
            name: "My Blog".to_string(),
            sociallinks: vec![SocialLink {
                name: "GitHub".to_string(),
                icon: "github".to_string(),
                link: "https://github.com/me".to_string(),
            }],
            ..SiteSettings::default()
        };
        settings
            .extra
            .insert("disqus".to_string(), serde_json::json!("me"));
        repo.save(&settings).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), settings);
    }
}
