use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vertex3 { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexCoord3 {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl TexCoord3 {
    pub fn new(u: f64, v: f64, w: f64) -> Self {
        TexCoord3 { u, v, w }
    }
}

/// Corner of a polygon. Indices are 1-based into the owning model's tables;
/// `0` for the texture or normal index means the reference omitted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRef {
    pub vertex_index: usize,
    pub texture_coords_index: usize,
    pub vertex_normal_index: usize,
}

/// Point of a polyline. Lines have no normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineVertexRef {
    pub vertex_index: usize,
    pub texture_coords_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub material: String,
    pub group: String,
    pub smoothing_group: u32,
    pub vertices: Vec<VertexRef>,
}

/// One `l` statement: a polyline through two or more points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub vertices: Vec<LineVertexRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub vertices: Vec<Vertex3>,
    pub texture_coords: Vec<TexCoord3>,
    pub vertex_normals: Vec<Vertex3>,
    pub polygons: Vec<Polygon>,
    pub lines: Vec<LineSegment>,
}

impl Model {
    pub fn new(name: &str) -> Self {
        Model {
            name: name.to_string(),
            vertices: Vec::new(),
            texture_coords: Vec::new(),
            vertex_normals: Vec::new(),
            polygons: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Distinct material names used by this model's polygons, in order of
    /// first use. Polygons defined before any `usemtl` contribute `""`.
    pub fn materials_used(&self) -> Vec<&str> {
        let mut materials: Vec<&str> = Vec::new();
        for polygon in &self.polygons {
            if !materials.contains(&polygon.material.as_str()) {
                materials.push(&polygon.material);
            }
        }
        materials
    }

    pub fn polygons_by_material<'a>(
        &'a self,
        material: &'a str,
    ) -> impl Iterator<Item = &'a Polygon> + 'a {
        self.polygons.iter().filter(move |p| p.material == material)
    }
}

/// Everything read from one OBJ document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjFile {
    pub models: Vec<Model>,
    /// `mtllib` references in file order, duplicates kept.
    pub material_libraries: Vec<String>,
}

impl ObjFile {
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(material: &str) -> Polygon {
        Polygon {
            material: material.to_string(),
            group: String::new(),
            smoothing_group: 0,
            vertices: Vec::new(),
        }
    }

    #[test]
    fn test_materials_used() {
        let mut model = Model::new("cube");
        model.polygons.push(polygon("red"));
        model.polygons.push(polygon("blue"));
        model.polygons.push(polygon("red"));
        model.polygons.push(polygon(""));

        assert_eq!(model.materials_used(), vec!["red", "blue", ""]);
    }

    #[test]
    fn test_polygons_by_material() {
        let mut model = Model::new("cube");
        model.polygons.push(polygon("red"));
        model.polygons.push(polygon("blue"));
        model.polygons.push(polygon("red"));

        assert_eq!(model.polygons_by_material("red").count(), 2);
        assert_eq!(model.polygons_by_material("blue").count(), 1);
        assert_eq!(model.polygons_by_material("green").count(), 0);
    }

    #[test]
    fn test_model_lookup() {
        let file = ObjFile {
            models: vec![Model::new("a"), Model::new("b")],
            material_libraries: Vec::new(),
        };

        assert_eq!(file.model("b").map(|m| m.name.as_str()), Some("b"));
        assert!(file.model("c").is_none());
    }
}
