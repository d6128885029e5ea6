pub mod image_io;
pub mod stack_file;

use std::path::Path;

use tracing::warn;

use crate::dataset::AnyHyperstack;
use crate::error::Result;

/// Extension of the native stack file format.
pub const STACK_FILE_EXTENSION: &str = "hst";

fn is_stack_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(STACK_FILE_EXTENSION))
}

/// Load a hyperstack, choosing the reader from the file extension.
///
/// `.hst` files are read natively; anything else goes through the image
/// importer.
pub fn load(path: &Path) -> Result<AnyHyperstack> {
    if is_stack_file(path) {
        stack_file::read_stack(path)
    } else {
        image_io::import_image(path)
    }
}

/// Save a hyperstack, choosing the writer from the file extension.
///
/// `.hst` keeps every plane; image formats receive the first XY plane
/// and a warning is logged when others are dropped.
pub fn save(stack: &AnyHyperstack, path: &Path) -> Result<()> {
    if is_stack_file(path) {
        stack_file::write_stack(stack, path)
    } else {
        let planes = stack.plane_count();
        if planes > 1 {
            warn!(
                path = %path.display(),
                planes,
                "Image formats hold one XY plane; the remaining planes are not written"
            );
        }
        let origin = vec![0; stack.dims().len()];
        image_io::export_plane(stack, &origin, path)
    }
}
