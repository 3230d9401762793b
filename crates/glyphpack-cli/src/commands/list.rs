// this_file: crates/glyphpack-cli/src/commands/list.rs

//! List command implementation

use glyphpack_raster::{list_system_fonts, SystemFace};

use crate::cli::ListArgs;

pub fn run(args: &ListArgs) {
    let faces = list_system_fonts();
    let shown = matching(&faces, args.filter.as_deref());
    for face in &shown {
        println!("{:<40} {}", face.post_script_name, face.family);
    }
    log::debug!("{} of {} installed faces listed", shown.len(), faces.len());
}

fn matching<'a>(faces: &'a [SystemFace], filter: Option<&str>) -> Vec<&'a SystemFace> {
    let needle = filter.map(str::to_lowercase);
    faces
        .iter()
        .filter(|face| match &needle {
            Some(needle) => {
                face.post_script_name.to_lowercase().contains(needle)
                    || face.family.to_lowercase().contains(needle)
            },
            None => true,
        })
        .collect()
}
