//! 저장소에 영속되는 도메인 엔티티

pub mod users;
