/// `,` bytestring
pub(crate) const TAG_STRING: u8 = b',';
/// `#` integer
pub(crate) const TAG_INTEGER: u8 = b'#';
/// `^` float
pub(crate) const TAG_FLOAT: u8 = b'^';
/// `!` boolean
pub(crate) const TAG_BOOL: u8 = b'!';
/// `~` null
pub(crate) const TAG_NULL: u8 = b'~';
/// `]` list
pub(crate) const TAG_LIST: u8 = b']';
/// `}` dictionary
pub(crate) const TAG_DICT: u8 = b'}';

/// Separates the length prefix from the payload.
pub(crate) const LEN_SEP: u8 = b':';

pub(crate) const LIT_TRUE: &[u8] = b"true";
pub(crate) const LIT_FALSE: &[u8] = b"false";

/// Length prefixes longer than this cannot name a payload that fits in memory.
pub(crate) const MAX_LEN_DIGITS: usize = 20;

/// Default limit on container nesting, for both directions.
pub const DEFAULT_MAX_DEPTH: usize = 512;
