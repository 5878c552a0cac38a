use serde::{Deserialize, Serialize};

/// Camera images live in this subdirectory of each session.
pub const CAM_SUBDIR: &str = "cam";

/// One label per captured frame: the steering command and a reference to
/// the camera image it was captured with. The `user/angle` and
/// `cam/image_array` field names are the on-disk contract shared with the
/// recorder and the training job.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Record {
    #[serde(rename = "user/angle")]
    pub user_angle: f32,
    #[serde(rename = "cam/image_array")]
    pub cam_image_array: String,
}

/// Record filename for a frame index, leading zeros preserved.
pub fn record_file_name(idx: &str) -> String {
    format!("record_{idx}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_field_names() {
        let json = r#"{"user/angle":-0.25,"cam/image_array":"cam-image_array_0000042.jpg"}"#;
        let rcd: Record = serde_json::from_str(json).unwrap();
        assert_eq!(rcd.user_angle, -0.25);
        assert_eq!(rcd.cam_image_array, "cam-image_array_0000042.jpg");

        let back = serde_json::to_string(&rcd).unwrap();
        assert!(back.contains("\"user/angle\""));
        assert!(back.contains("\"cam/image_array\""));
    }

    #[test]
    fn record_file_name_keeps_leading_zeros() {
        assert_eq!(record_file_name("0000042"), "record_0000042.json");
    }
}
