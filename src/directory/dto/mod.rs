pub mod new_user_dto;
