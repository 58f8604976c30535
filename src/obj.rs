use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_till1, take_while1};
use nom::character::complete::{char, i64 as integer, u32 as natural};
use nom::combinator::{all_consuming, opt, value};
use nom::multi::{separated_list0, separated_list1};
use nom::number::complete::double;
use nom::sequence::delimited;
use nom::IResult;
use tracing::{debug, instrument, trace, warn};

use crate::error::{ObjError, Result};
use crate::model::*;
use crate::options::{ParseOptions, UnknownStatements};

/*
    Basic Parsers
*/

fn is_space(c: char) -> bool {
    c.is_whitespace()
}

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while1(is_space)(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(is_space)(input)
}

fn words(input: &str) -> IResult<&str, Vec<&str>> {
    delimited(opt(spaces), separated_list0(spaces, word), opt(spaces))(input)
}

/// Everything from the first `#` on is a comment. There is no escape.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(start) => &line[..start],
        None => line,
    }
}

/*
    Numbers
*/

fn float(input: &str) -> IResult<&str, f64> {
    double(input)
}

fn index(input: &str) -> IResult<&str, i64> {
    integer(input)
}

fn smoothing_group(input: &str) -> IResult<&str, u32> {
    alt((value(0, tag("off")), natural))(input)
}

/*
    Vertex References
*/

/// Splits `v/vt/vn` into its fields, keeping empty ones (`1//3` has three).
fn reference_fields(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('/'), take_till(|c: char| c == '/'))(input)
}

/// Table sizes of the current model when a statement starts. Relative
/// (negative) indices resolve against these.
#[derive(Clone, Copy)]
struct TableCounts {
    vertices: usize,
    texture_coords: usize,
    vertex_normals: usize,
}

/*
    Statements
*/

/// Running state of one parse. Group and smoothing group are scoped to the
/// current model; the material carries over from one model to the next.
struct Parser<'o> {
    options: &'o ParseOptions,
    result: ObjFile,
    current_material: String,
    current_group: String,
    current_smoothing_group: u32,
    line: usize,
}

impl<'o> Parser<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Parser {
            options,
            result: ObjFile::default(),
            current_material: String::new(),
            current_group: String::new(),
            current_smoothing_group: 0,
            line: 0,
        }
    }

    fn grammar_error(&self, message: impl Into<String>) -> ObjError {
        ObjError::Grammar { line: self.line, message: message.into() }
    }

    fn geometry_error(&self, message: impl Into<String>) -> ObjError {
        ObjError::Geometry { line: self.line, message: message.into() }
    }

    fn number<O>(&self, parser: fn(&str) -> IResult<&str, O>, token: &str) -> Result<O> {
        match all_consuming(parser)(token) {
            Ok((_, number)) => Ok(number),
            Err(_) => Err(ObjError::NumericFormat { line: self.line, token: token.to_string() }),
        }
    }

    fn parse_line(&mut self, line: &str) -> Result<()> {
        let (_, tokens) = words(strip_comment(line))
            .map_err(|_| self.grammar_error("Unreadable statement"))?;

        match tokens.split_first() {
            Some((keyword, args)) => self.statement(keyword, args),
            None => Ok(()),
        }
    }

    fn statement(&mut self, keyword: &str, args: &[&str]) -> Result<()> {
        match keyword.to_lowercase().as_str() {
            "o" => self.object(args),
            "g" => self.group(args)?,
            "v" => {
                let [x, y, z] = self.coordinates(args)?;
                self.current_model().vertices.push(Vertex3::new(x, y, z));
            }
            "vt" => {
                let [u, v, w] = self.coordinates(args)?;
                self.current_model().texture_coords.push(TexCoord3::new(u, v, w));
            }
            "vn" => {
                let [x, y, z] = self.coordinates(args)?;
                self.current_model().vertex_normals.push(Vertex3::new(x, y, z));
            }
            "s" => self.smoothing(args)?,
            "f" => self.polygon(args)?,
            "l" => self.line_segment(args)?,
            "mtllib" => {
                self.result.material_libraries.extend(args.iter().map(|name| name.to_string()));
            }
            "usemtl" => {
                if let Some(name) = args.first() {
                    self.current_material = name.to_string();
                }
            }
            _ => self.unknown(keyword),
        }

        Ok(())
    }

    fn unknown(&self, keyword: &str) {
        match self.options.unknown_statements {
            UnknownStatements::Ignore => {
                trace!(line = self.line, keyword, "skipping unsupported statement")
            }
            UnknownStatements::Warn => {
                warn!(line = self.line, keyword, "skipping unsupported statement")
            }
        }
    }

    /*
        Models
    */

    fn start_model(&mut self, name: &str) {
        debug!(line = self.line, model = name, "starting model");
        self.result.models.push(Model::new(name));
        self.current_group.clear();
        self.current_smoothing_group = 0;
    }

    /// The model geometry is appended to. Geometry seen before any `o`
    /// starts a model with the default name, keeping the group and
    /// smoothing group already in effect.
    fn current_model(&mut self) -> &mut Model {
        if self.result.models.is_empty() {
            debug!(
                line = self.line,
                model = %self.options.default_model_name,
                "starting implicit model"
            );
            self.result.models.push(Model::new(&self.options.default_model_name));
        }

        let last = self.result.models.len() - 1;
        &mut self.result.models[last]
    }

    fn table_counts(&mut self) -> TableCounts {
        let model = self.current_model();
        TableCounts {
            vertices: model.vertices.len(),
            texture_coords: model.texture_coords.len(),
            vertex_normals: model.vertex_normals.len(),
        }
    }

    fn object(&mut self, args: &[&str]) {
        let options = self.options;
        let name = args.first().copied().unwrap_or(options.default_model_name.as_str());
        self.start_model(name);
    }

    fn group(&mut self, args: &[&str]) -> Result<()> {
        match args {
            [name] => {
                self.current_group = name.to_string();
                Ok(())
            }
            _ => Err(self.grammar_error("Group statements must have exactly 1 argument (eg. g group_1)")),
        }
    }

    fn smoothing(&mut self, args: &[&str]) -> Result<()> {
        match args {
            [token] => {
                self.current_smoothing_group = self.number(smoothing_group, token)?;
                Ok(())
            }
            _ => Err(self.grammar_error("Smoothing group statements must have exactly 1 argument (eg. s 1 or s off)")),
        }
    }

    /*
        Coordinates
    */

    /// Up to three components; missing ones are `0.0`, extra ones (such as a
    /// rational weight) are ignored.
    fn coordinates(&self, args: &[&str]) -> Result<[f64; 3]> {
        let mut components = [0.0; 3];
        for (component, token) in components.iter_mut().zip(args) {
            *component = self.number(float, token)?;
        }
        Ok(components)
    }

    /*
        Faces and Lines
    */

    fn fields<'t>(&self, token: &'t str, max: usize) -> Result<Vec<&'t str>> {
        let (_, fields) = reference_fields(token)
            .map_err(|_| self.grammar_error(format!("Unreadable vertex reference `{}`", token)))?;

        if fields.len() > max {
            return Err(self.grammar_error("Too many values for a single vertex"));
        }

        Ok(fields)
    }

    /// Turns a relative index into an absolute one against `count`
    /// elements defined so far. Non-negative indices pass through.
    /// Applies to vertex, texture and normal fields alike: a relative
    /// index reaching before the first element of its table is an error.
    fn resolve(&self, raw: i64, count: usize, token: &str) -> Result<usize> {
        if raw >= 0 {
            return Ok(raw as usize);
        }

        let resolved = count as i64 + 1 + raw;
        if resolved < 1 {
            return Err(self.geometry_error(format!(
                "Relative index in `{}` reaches before the first of {} defined elements",
                token, count
            )));
        }
        Ok(resolved as usize)
    }

    fn vertex_index(&self, field: &str, counts: TableCounts, token: &str) -> Result<usize> {
        if field.is_empty() {
            return Err(self.grammar_error(format!("Missing vertex index in `{}`", token)));
        }

        let raw = self.number(index, field)?;
        if raw == 0 {
            return Err(self.geometry_error("Invalid vertex index of 0"));
        }
        self.resolve(raw, counts.vertices, token)
    }

    /// Texture and normal fields may be absent or empty, both meaning `0`.
    fn optional_index(&self, field: Option<&&str>, count: usize, token: &str) -> Result<usize> {
        match field {
            Some(field) if !field.is_empty() => {
                let raw = self.number(index, field)?;
                self.resolve(raw, count, token)
            }
            _ => Ok(0),
        }
    }

    fn vertex_ref(&self, token: &str, counts: TableCounts) -> Result<VertexRef> {
        let fields = self.fields(token, 3)?;

        Ok(VertexRef {
            vertex_index: self.vertex_index(fields[0], counts, token)?,
            texture_coords_index: self.optional_index(fields.get(1), counts.texture_coords, token)?,
            vertex_normal_index: self.optional_index(fields.get(2), counts.vertex_normals, token)?,
        })
    }

    fn line_vertex_ref(&self, token: &str, counts: TableCounts) -> Result<LineVertexRef> {
        let fields = self.fields(token, 2)?;

        Ok(LineVertexRef {
            vertex_index: self.vertex_index(fields[0], counts, token)?,
            texture_coords_index: self.optional_index(fields.get(1), counts.texture_coords, token)?,
        })
    }

    fn polygon(&mut self, args: &[&str]) -> Result<()> {
        if args.len() < 3 {
            return Err(self.geometry_error("Face statement has less than 3 vertices"));
        }

        let counts = self.table_counts();
        let vertices = args
            .iter()
            .map(|token| self.vertex_ref(token, counts))
            .collect::<Result<Vec<_>>>()?;

        let polygon = Polygon {
            material: self.current_material.clone(),
            group: self.current_group.clone(),
            smoothing_group: self.current_smoothing_group,
            vertices,
        };
        self.current_model().polygons.push(polygon);
        Ok(())
    }

    fn line_segment(&mut self, args: &[&str]) -> Result<()> {
        if args.len() < 2 {
            return Err(self.geometry_error("Line statement has less than 2 vertices"));
        }

        let counts = self.table_counts();
        let vertices = args
            .iter()
            .map(|token| self.line_vertex_ref(token, counts))
            .collect::<Result<Vec<_>>>()?;

        self.current_model().lines.push(LineSegment { vertices });
        Ok(())
    }
}

/// Parses a whole OBJ document with the default options.
pub fn parse_obj_file(data: &str) -> Result<ObjFile> {
    parse_obj_file_with(data, &ParseOptions::default())
}

/// Parses a whole OBJ document.
///
/// Statements are applied in file order. The first malformed statement
/// aborts the parse and nothing parsed so far is returned.
#[instrument(skip(data, options), fields(bytes = data.len()))]
pub fn parse_obj_file_with(data: &str, options: &ParseOptions) -> Result<ObjFile> {
    let mut parser = Parser::new(options);

    for (number, line) in data.lines().enumerate() {
        parser.line = number + 1;
        parser.parse_line(line)?;
    }

    let result = parser.result;
    debug!(
        models = result.models.len(),
        material_libraries = result.material_libraries.len(),
        "parsed OBJ"
    );
    Ok(result)
}

impl FromStr for ObjFile {
    type Err = ObjError;

    fn from_str(data: &str) -> Result<Self> {
        parse_obj_file(data)
    }
}
