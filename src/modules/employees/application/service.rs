use std::sync::Arc;

use crate::modules::employees::domain::{
    EmployeeUpdate, NewUser, PasswordHash, Role, User, UserRepository,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_info, log_warn};

pub const DEMO_PASSWORD: &str = "password123";

const DEMO_USERS: [(&str, &str, Role); 4] = [
    ("super_admin", "Super Admin User", Role::SuperAdmin),
    ("admin1", "Admin User", Role::Admin),
    ("manager1", "Manager User", Role::Manager),
    ("user1", "Regular User", Role::User),
];

/// Raw fields of a new account as submitted by the dashboard.
#[derive(Debug, Clone, Default)]
pub struct RegisterEmployee {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub is_temporary: bool,
}

/// Employee accounts and password login. Credentials are checked on each
/// call; there are no sessions.
pub struct EmployeeService {
    repository: Arc<dyn UserRepository>,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn login(&self, username: Option<&str>, password: Option<&str>) -> AppResult<User> {
        let (Some(username), Some(password)) = (
            username.map(str::trim).filter(|u| !u.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::ValidationError(
                "Missing username or password".to_string(),
            ));
        };

        match self.repository.find_by_username(username).await? {
            Some(user) if user.check_password(password) => {
                log_info!("User {} logged in", user.username);
                Ok(user)
            }
            _ => {
                log_warn!("Failed login attempt for {}", username);
                Err(AppError::Unauthorized(
                    "Invalid username or password".to_string(),
                ))
            }
        }
    }

    pub async fn register(&self, request: RegisterEmployee) -> AppResult<User> {
        let username = Validator::required("username", request.username.as_deref())?;
        let name = Validator::required("name", request.name.as_deref())?;
        let password = request.password.filter(|p| !p.is_empty()).ok_or_else(|| {
            AppError::ValidationError("Missing required field: password".to_string())
        })?;
        Validator::validate_username(&username)?;
        Validator::validate_max_length("Name", &name, 120)?;
        Validator::validate_password(&password)?;

        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::ValidationError(
                "Username already exists".to_string(),
            ));
        }

        let user = self
            .repository
            .insert(NewUser {
                username,
                password_hash: PasswordHash::generate(&password),
                name,
                role: request.role.unwrap_or_default(),
                is_temporary_password: request.is_temporary,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with another registration of the same name
                AppError::Conflict(_) => {
                    AppError::ValidationError("Username already exists".to_string())
                }
                other => other,
            })?;

        log_info!("Created user {} ({})", user.username, user.role);
        Ok(user)
    }

    pub async fn change_password(
        &self,
        user_id: Option<i32>,
        old_password: Option<&str>,
        new_password: Option<&str>,
    ) -> AppResult<()> {
        let (Some(user_id), Some(old_password), Some(new_password)) = (
            user_id,
            old_password.filter(|p| !p.is_empty()),
            new_password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::ValidationError(
                "Missing required fields".to_string(),
            ));
        };

        let mut user = self.get_user(user_id).await?;
        if !user.check_password(old_password) {
            return Err(AppError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }
        Validator::validate_password(new_password)?;

        user.set_password(new_password, false);
        self.repository.update(&user).await?;
        log_info!("User {} changed their password", user.username);
        Ok(())
    }

    /// Administrative reset; the new password is usually temporary.
    pub async fn reset_password(
        &self,
        user_id: i32,
        new_password: Option<&str>,
        is_temporary: bool,
    ) -> AppResult<User> {
        let new_password = new_password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::ValidationError("Missing new password".to_string()))?;
        Validator::validate_password(new_password)?;

        let mut user = self.get_user(user_id).await?;
        user.set_password(new_password, is_temporary);
        let saved = self.repository.update(&user).await?;
        log_info!("Password reset for user {}", saved.username);
        Ok(saved)
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.get_all().await
    }

    pub async fn update_employee(&self, id: i32, update: EmployeeUpdate) -> AppResult<User> {
        let update = EmployeeUpdate {
            name: update
                .name
                .map(|n| Validator::required("name", Some(&n)))
                .transpose()?,
            role: update.role,
        };

        let mut user = self.get_user(id).await?;
        user.apply_update(update);
        self.repository.update(&user).await
    }

    pub async fn delete_employee(&self, id: i32) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        log_info!("Deleted user {}", id);
        Ok(())
    }

    /// Create the four demo accounts that are missing. Returns how many
    /// were created.
    pub async fn seed_demo_users(&self) -> AppResult<usize> {
        let mut created = 0;
        for (username, name, role) in DEMO_USERS {
            if self.repository.find_by_username(username).await?.is_some() {
                continue;
            }
            self.repository
                .insert(NewUser {
                    username: username.to_string(),
                    password_hash: PasswordHash::generate(DEMO_PASSWORD),
                    name: name.to_string(),
                    role,
                    is_temporary_password: false,
                })
                .await?;
            log_info!("Seeded demo user {} ({})", username, role);
            created += 1;
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::employees::domain::repositories::MockUserRepository;
    use crate::shared::testing::InMemoryUsers;

    fn service() -> EmployeeService {
        EmployeeService::new(Arc::new(InMemoryUsers::new()))
    }

    fn registration(username: &str, password: &str) -> RegisterEmployee {
        RegisterEmployee {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            name: Some("Jamie Driver".to_string()),
            role: None,
            is_temporary: false,
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let service = service();
        let user = service
            .register(registration("jdriver", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);

        let logged_in = service
            .login(Some("jdriver"), Some("secret1"))
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);

        assert!(matches!(
            service.login(Some("jdriver"), Some("wrong-pass")).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.login(Some("nobody"), Some("secret1")).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.login(None, Some("secret1")).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let service = service();
        service
            .register(registration("jdriver", "secret1"))
            .await
            .unwrap();
        let err = service
            .register(registration("jdriver", "secret2"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::ValidationError("Username already exists".to_string())
        );
    }

    #[tokio::test]
    async fn short_passwords_are_rejected() {
        let err = service()
            .register(registration("jdriver", "123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn change_password_checks_old_one() {
        let service = service();
        let mut request = registration("jdriver", "temp-pass");
        request.is_temporary = true;
        let user = service.register(request).await.unwrap();
        assert!(user.is_temporary_password);

        assert!(matches!(
            service
                .change_password(Some(user.id), Some("not-it"), Some("new-pass"))
                .await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service
                .change_password(Some(999), Some("temp-pass"), Some("new-pass"))
                .await,
            Err(AppError::NotFound(_))
        ));

        service
            .change_password(Some(user.id), Some("temp-pass"), Some("new-pass"))
            .await
            .unwrap();
        let reloaded = service.get_user(user.id).await.unwrap();
        assert!(!reloaded.is_temporary_password);
        assert!(service.login(Some("jdriver"), Some("new-pass")).await.is_ok());
    }

    #[tokio::test]
    async fn reset_marks_password_temporary() {
        let service = service();
        let user = service
            .register(registration("jdriver", "secret1"))
            .await
            .unwrap();

        let reset = service
            .reset_password(user.id, Some("reset-123"), true)
            .await
            .unwrap();
        assert!(reset.is_temporary_password);
        assert!(reset.check_password("reset-123"));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let service = service();
        let user = service
            .register(registration("jdriver", "secret1"))
            .await
            .unwrap();

        let updated = service
            .update_employee(
                user.id,
                EmployeeUpdate {
                    role: Some(Role::Manager),
                    name: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Manager);
        assert_eq!(updated.name, "Jamie Driver");
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let service = service();
        assert_eq!(service.seed_demo_users().await.unwrap(), 4);
        assert_eq!(service.seed_demo_users().await.unwrap(), 0);

        let admin = service
            .login(Some("super_admin"), Some(DEMO_PASSWORD))
            .await
            .unwrap();
        assert_eq!(admin.role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn deleting_unknown_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Ok(false));
        let service = EmployeeService::new(Arc::new(repo));
        assert!(matches!(
            service.delete_employee(3).await,
            Err(AppError::NotFound(_))
        ));
    }
}
