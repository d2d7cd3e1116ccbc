use types::address::Address;

/// Fixed limits, prefixes and schema names shared by every precompiled
/// handler.
pub struct Config;

impl Config {
    pub const FS_PATH_MAX_LENGTH: usize = 56;
    pub const FS_PATH_MAX_LEVEL: usize = 6;

    pub const USER_TABLE_NAME_MAX_LENGTH: usize = 64;
    pub const USER_TABLE_FIELD_NAME_MAX_LENGTH: usize = 64;
    pub const USER_TABLE_KEY_VALUE_MAX_LENGTH: usize = 255;
    pub const USER_TABLE_FIELD_VALUE_MAX_LENGTH: usize = 16 * 1024 * 1024 - 1;

    pub const USER_TABLE_PREFIX: &'static str = "u_";
    pub const CONTRACT_TABLE_PREFIX: &'static str = "c_";

    pub const FS_ROOT: &'static str = "/";
    pub const FS_KEY_NAME: &'static str = "name";
    pub const FS_FIELD_TYPE: &'static str = "type";
    pub const FS_FIELD_EXTRA: &'static str = "extra";
    pub const FS_VALUE_FIELDS: [&'static str; 2] = [Self::FS_FIELD_TYPE, Self::FS_FIELD_EXTRA];

    /// Address the filesystem handler is registered under.
    pub const FILE_SYSTEM_ADDRESS: Address = Address::precompiled(0x100e);

    pub const SELECTOR_LEN: usize = 4;
}
