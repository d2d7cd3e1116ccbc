use core::fmt;

/// Integer status codes returned to on-chain callers.
///
/// Every outcome of a precompiled call, success or failure, is reported as
/// one of these values ABI-encoded into the return data. Codes are grouped by
/// the subsystem that raises them: table naming/limits in the `-500xx` band,
/// call-level input problems at `-50100`, filesystem outcomes in `-530xx`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    Success = 0,

    TableNameAlreadyExist = -50001,
    TableNameLengthOverflow = -50002,
    TableFieldLengthOverflow = -50003,
    TableKeyValueLengthOverflow = -50005,
    TableFieldValueLengthOverflow = -50006,
    TableDuplicateField = -50007,
    TableInvalidateField = -50008,

    InvalidInput = -50100,

    FileNotExist = -53001,
    FileAlreadyExist = -53002,
    FileBuildDirFailed = -53003,
    FileInvalidType = -53004,
    FileInvalidPath = -53005,
}

impl StatusCode {
    pub const ALL: [StatusCode; 14] = [
        StatusCode::Success,
        StatusCode::TableNameAlreadyExist,
        StatusCode::TableNameLengthOverflow,
        StatusCode::TableFieldLengthOverflow,
        StatusCode::TableKeyValueLengthOverflow,
        StatusCode::TableFieldValueLengthOverflow,
        StatusCode::TableDuplicateField,
        StatusCode::TableInvalidateField,
        StatusCode::InvalidInput,
        StatusCode::FileNotExist,
        StatusCode::FileAlreadyExist,
        StatusCode::FileBuildDirFailed,
        StatusCode::FileInvalidType,
        StatusCode::FileInvalidPath,
    ];

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.code() == code)
    }

    pub fn is_success(self) -> bool {
        matches!(self, StatusCode::Success)
    }
}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> i32 {
        status.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}
