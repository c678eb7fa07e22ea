mod auth_dto;

pub use auth_dto::{
    LoginRequestDto, RegisterRequestDto, RegisterResponseDto, TokenResponseDto, UserDto,
};
