//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AccountRepository, DiscordMemberRepository, MemberPage, RepoResult, SyncStateRepository,
    UserRepository,
};
