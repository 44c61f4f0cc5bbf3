pub mod mx;
pub mod record_type;
pub mod response_code;

pub use mx::MxRecord;
pub use record_type::RecordType;
pub use response_code::ResponseCode;
