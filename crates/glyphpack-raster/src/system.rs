// this_file: crates/glyphpack-raster/src/system.rs

//! Installed fonts

use glyphpack_core::error::{FontLoadError, Result};

use crate::font::FontFile;

/// An installed face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFace {
    pub post_script_name: String,
    pub family: String,
}

fn system_database() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("Found {} installed font faces", db.len());
    db
}

/// Every installed face, sorted by PostScript name
pub fn list_system_fonts() -> Vec<SystemFace> {
    let db = system_database();
    let mut faces: Vec<SystemFace> = db
        .faces()
        .map(|face| SystemFace {
            post_script_name: face.post_script_name.clone(),
            family: face
                .families
                .first()
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
        })
        .collect();
    faces.sort_by(|a, b| a.post_script_name.cmp(&b.post_script_name));
    faces.dedup_by(|a, b| a.post_script_name == b.post_script_name);
    faces
}

/// Loads the installed face with this PostScript name
pub fn find_system_font(post_script_name: &str) -> Result<FontFile> {
    let db = system_database();
    let id = db
        .faces()
        .find(|face| face.post_script_name == post_script_name)
        .map(|face| face.id)
        .ok_or_else(|| FontLoadError::NameNotFound(post_script_name.to_string()))?;

    db.with_face_data(id, |data, face_index| {
        FontFile::from_data_index(data.to_vec(), face_index)
    })
    .unwrap_or_else(|| Err(FontLoadError::NameNotFound(post_script_name.to_string()).into()))
}
