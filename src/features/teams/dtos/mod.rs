pub mod team_dto;

pub use team_dto::UpdateTeamStatusDto;
