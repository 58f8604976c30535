//! Wavefront OBJ parsing.
//!
//! [`parse_obj_file`] reads a whole document into an [`ObjFile`]: the models
//! in file order, each with its own vertex, texture coordinate and normal
//! tables plus the polygons and polylines indexing into them, and the names
//! of the referenced material libraries.
//!
//! ```
//! let file = objfile::parse_obj_file("o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
//! assert_eq!(file.models[0].name, "tri");
//! assert_eq!(file.models[0].polygons[0].vertices.len(), 3);
//! ```

extern crate nom;

mod error;
mod obj;
mod options;
pub mod model;

pub use self::error::{ObjError, Result};
pub use self::model::{LineSegment, LineVertexRef, Model, ObjFile, Polygon, TexCoord3, Vertex3, VertexRef};
pub use self::obj::{parse_obj_file, parse_obj_file_with};
pub use self::options::{ParseOptions, UnknownStatements, DEFAULT_MODEL_NAME};
