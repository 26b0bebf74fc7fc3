use crate::domain::commands::user::RegisterUserCommand;
use crate::domain::models::user::User as DomainUser;
use shared::{RegisterUserRequest, User, UserResponse};

pub struct UserMapper;

impl UserMapper {
    pub fn to_dto(domain: DomainUser) -> User {
        User {
            id: domain.id,
            email: domain.email,
            name: domain.name,
        }
    }

    pub fn to_register_command(request: RegisterUserRequest) -> RegisterUserCommand {
        RegisterUserCommand {
            id: request.id,
            email: request.email,
            name: request.name,
        }
    }

    pub fn to_user_response(domain: DomainUser) -> UserResponse {
        UserResponse {
            user: Self::to_dto(domain),
        }
    }
}
