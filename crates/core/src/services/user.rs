//! User profile service.

use reporter_common::{AppError, AppResult};
use reporter_db::{
    entities::{user, Role},
    repositories::{ClassRepository, FacultyRepository, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::auth::UserView;

/// Caller profile joined with faculty and class names.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub user: UserView,
    pub faculty_name: Option<String>,
    pub class_name: Option<String>,
}

/// Input for updating the caller's own profile.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

/// User service.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    faculty_repo: FacultyRepository,
    class_repo: ClassRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        faculty_repo: FacultyRepository,
        class_repo: ClassRepository,
    ) -> Self {
        Self {
            user_repo,
            faculty_repo,
            class_repo,
        }
    }

    /// The caller's profile with faculty and class names attached.
    pub async fn profile(&self, actor: &user::Model) -> AppResult<ProfileView> {
        let faculty_name = self
            .faculty_repo
            .find_by_id(actor.faculty_id)
            .await?
            .map(|f| f.name);

        let class_name = match actor.class_id {
            Some(class_id) => self.class_repo.find_by_id(class_id).await?.map(|c| c.name),
            None => None,
        };

        Ok(ProfileView {
            user: actor.clone().into(),
            faculty_name,
            class_name,
        })
    }

    /// Update the caller's own name or email.
    ///
    /// A duplicate email surfaces as a conflict from the unique index.
    pub async fn update_profile(
        &self,
        actor: &user::Model,
        input: UpdateProfileInput,
    ) -> AppResult<UserView> {
        input.validate()?;

        if input.name.is_none() && input.email.is_none() {
            return Err(AppError::BadRequest("Nothing to update".to_string()));
        }

        let mut model = user::ActiveModel {
            id: Set(actor.id),
            ..Default::default()
        };
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(email) = input.email {
            model.email = Set(email.to_lowercase());
        }

        let updated = self.user_repo.update(model).await?;
        Ok(updated.into())
    }

    /// Record an uploaded profile image path on the user row.
    pub async fn set_profile_image(&self, user_id: i32, path: &str) -> AppResult<UserView> {
        let updated = self.user_repo.set_profile_image(user_id, path).await?;
        Ok(updated.into())
    }

    /// Users of one role within the caller's faculty.
    pub async fn users_by_role(
        &self,
        actor: &user::Model,
        role: Role,
    ) -> AppResult<Vec<UserView>> {
        let users = self
            .user_repo
            .find_by_role_in_faculty(role, actor.faculty_id)
            .await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}
