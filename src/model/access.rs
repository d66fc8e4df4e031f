use crate::model::entity::{UserEntity, UserRole};

/// `true` when `user` is allowed to act as `expected`.
pub fn has_role(user: &UserEntity, expected: UserRole) -> bool {
    user.role() == expected
}
