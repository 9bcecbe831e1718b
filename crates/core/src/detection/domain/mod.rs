pub mod detection;
pub mod detection_list;
pub mod unknown_face_check;
