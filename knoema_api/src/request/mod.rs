mod common;
pub use self::common::{JsonRequest, Query};

mod pivot;
pub use self::pivot::{PivotAxisItem, PivotRequest};

mod upload;
pub use self::upload::{DatasetUpload, UploadStatusQuery, UploadVerifyQuery, DEFAULT_DATASET_NAME};

mod verify;
pub use self::verify::DatasetVerifyRequest;
