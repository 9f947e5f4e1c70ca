pub mod compare_faces;
