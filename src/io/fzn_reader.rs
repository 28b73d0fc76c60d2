use super::{ModelReader, WarningHandler};
use crate::model::{Annotation, Constraint, Domain, Expr, FlatModel, SetLiteral};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

const IDENT_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_]*";

lazy_static! {
    static ref BOOL_VAR_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^var\s+bool\s*:\s*({})\s*(?:::.*)?;$",
        IDENT_PATTERN
    ))
    .unwrap();
    static ref INT_RANGE_VAR_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^var\s+(-?\d+)\s*\.\.\s*(-?\d+)\s*:\s*({})\s*(?:::.*)?;$",
        IDENT_PATTERN
    ))
    .unwrap();
    static ref INT_SET_VAR_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^var\s+\{{([^}}]*)\}}\s*:\s*({})\s*(?:::.*)?;$",
        IDENT_PATTERN
    ))
    .unwrap();
    static ref INT_VAR_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^var\s+int\s*:\s*({})\s*(?:::.*)?;$",
        IDENT_PATTERN
    ))
    .unwrap();
    static ref CONSTRAINT_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^constraint\s+({})\s*\((.*)\)\s*((?:::.*)?);$",
        IDENT_PATTERN
    ))
    .unwrap();
    static ref SOLVE_LINE_PATTERN: Regex = Regex::new(r"^solve\b.*;$").unwrap();
    static ref PREDICATE_LINE_PATTERN: Regex = Regex::new(r"^predicate\b.*;$").unwrap();
    static ref ARRAY_DECL_LINE_PATTERN: Regex = Regex::new(r"^array\b.*;$").unwrap();
    static ref INT_LITERAL_PATTERN: Regex = Regex::new(r"^-?\d+$").unwrap();
    static ref RANGE_PATTERN: Regex = Regex::new(r"^(-?\d+)\s*\.\.\s*(-?\d+)$").unwrap();
    static ref IDENT_ONLY_PATTERN: Regex =
        Regex::new(&format!("^{}$", IDENT_PATTERN)).unwrap();
}

/// A reader for a FlatZinc-style subset.
///
/// The subset covers what the translator consumes: boolean variable
/// declarations, integer variable declarations with an interval or explicit
/// set domain, and constraint statements with optional `::` annotations.
/// `solve` items are accepted and ignored; `predicate` and `array`
/// declarations raise a warning and are skipped. Unbounded `var int`
/// declarations are rejected, since every integer variable must carry a
/// domain.
///
/// # Example
///
/// ```
/// # use zinco::io::{FznReader, ModelReader};
/// # use zinco::model::FlatModel;
/// fn read_model_from_str(s: &str) -> FlatModel {
///     let reader = FznReader::default();
///     reader.read(&mut s.as_bytes()).expect("invalid model")
/// }
/// # read_model_from_str("var 0..9: x;\nconstraint int_eq(x, 5);\n");
/// ```
#[derive(Default)]
pub struct FznReader {
    warning_handlers: Vec<WarningHandler>,
}

impl FznReader {
    fn warn(&self, line: usize, message: String) {
        self.warning_handlers.iter().for_each(|h| h(line, message.clone()));
    }

    fn read_line(&self, model: &mut FlatModel, line_index: usize, line: &str) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            return Ok(());
        }
        if PREDICATE_LINE_PATTERN.is_match(trimmed) {
            self.warn(line_index, "predicate declarations are ignored".to_string());
            return Ok(());
        }
        if ARRAY_DECL_LINE_PATTERN.is_match(trimmed) {
            self.warn(line_index, "array declarations are ignored".to_string());
            return Ok(());
        }
        if SOLVE_LINE_PATTERN.is_match(trimmed) {
            return Ok(());
        }
        if let Some(c) = BOOL_VAR_LINE_PATTERN.captures(trimmed) {
            let name = c.get(1).unwrap().as_str();
            if model.bool_var_handle(name).is_ok() {
                self.warn(line_index, format!(r#"redefinition of variable "{}""#, name));
            }
            model.declare_bool_var(name);
            return Ok(());
        }
        if let Some(c) = INT_RANGE_VAR_LINE_PATTERN.captures(trimmed) {
            let min = c.get(1).unwrap().as_str().parse::<i64>().unwrap();
            let max = c.get(2).unwrap().as_str().parse::<i64>().unwrap();
            if min > max {
                return Err(anyhow!("empty domain {}..{}", min, max));
            }
            let name = c.get(3).unwrap().as_str();
            if model.int_var_handle(name).is_ok() {
                self.warn(line_index, format!(r#"redefinition of variable "{}""#, name));
            }
            model.declare_int_var(name, Domain::Interval(min, max));
            return Ok(());
        }
        if let Some(c) = INT_SET_VAR_LINE_PATTERN.captures(trimmed) {
            let values = parse_int_list(c.get(1).unwrap().as_str())?;
            if values.is_empty() {
                return Err(anyhow!("empty domain {{}}"));
            }
            let name = c.get(2).unwrap().as_str();
            if model.int_var_handle(name).is_ok() {
                self.warn(line_index, format!(r#"redefinition of variable "{}""#, name));
            }
            model.declare_int_var(name, Domain::values(values));
            return Ok(());
        }
        if INT_VAR_LINE_PATTERN.is_match(trimmed) {
            return Err(anyhow!("unbounded integer variables are not supported"));
        }
        if let Some(c) = CONSTRAINT_LINE_PATTERN.captures(trimmed) {
            let name = c.get(1).unwrap().as_str();
            let args = parse_args(model, c.get(2).unwrap().as_str())
                .with_context(|| format!(r#"while parsing the arguments of "{}""#, name))?;
            let annotations = parse_annotations(c.get(3).unwrap().as_str());
            model.add_constraint(Constraint::with_annotations(name, args, annotations));
            return Ok(());
        }
        Err(anyhow!(r#"unrecognized statement "{}""#, trimmed))
    }
}

impl ModelReader for FznReader {
    fn read(&self, reader: &mut dyn Read) -> Result<FlatModel> {
        let mut model = FlatModel::new();
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let context = || format!("while parsing line {} of the model", i + 1);
            let line = line.with_context(context)?;
            self.read_line(&mut model, i + 1, &line).with_context(context)?;
        }
        Ok(model)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

fn parse_int_list(s: &str) -> Result<Vec<i64>> {
    s.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| {
            w.parse::<i64>()
                .with_context(|| format!(r#""{}" is not an integer"#, w))
        })
        .collect()
}

// Splits an argument list on the commas that are not nested inside brackets
// or braces.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                result.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    result.push(&s[start..]);
    result
}

fn parse_args(model: &FlatModel, s: &str) -> Result<Vec<Expr>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(s)
        .into_iter()
        .map(|w| parse_expr(model, w))
        .collect()
}

fn parse_expr(model: &FlatModel, s: &str) -> Result<Expr> {
    let s = s.trim();
    if s == "true" {
        return Ok(Expr::BoolConst(true));
    }
    if s == "false" {
        return Ok(Expr::BoolConst(false));
    }
    if INT_LITERAL_PATTERN.is_match(s) {
        return Ok(Expr::IntConst(s.parse().unwrap()));
    }
    if let Some(c) = RANGE_PATTERN.captures(s) {
        let min = c.get(1).unwrap().as_str().parse().unwrap();
        let max = c.get(2).unwrap().as_str().parse().unwrap();
        return Ok(Expr::SetLit(SetLiteral::Range(min, max)));
    }
    if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let elements = if inner.trim().is_empty() {
            Vec::new()
        } else {
            split_top_level(inner)
                .into_iter()
                .map(|w| parse_expr(model, w))
                .collect::<Result<Vec<Expr>>>()?
        };
        return Ok(Expr::Array(elements));
    }
    if let Some(inner) = s.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        return Ok(Expr::SetLit(SetLiteral::Values(parse_int_list(inner)?)));
    }
    if IDENT_ONLY_PATTERN.is_match(s) {
        if let Ok(handle) = model.int_var_handle(s) {
            return Ok(Expr::IntVar(handle));
        }
        if let Ok(handle) = model.bool_var_handle(s) {
            return Ok(Expr::BoolVar(handle));
        }
        return Err(anyhow!(r#"undefined identifier "{}""#, s));
    }
    Err(anyhow!(r#"cannot parse expression "{}""#, s))
}

fn parse_annotations(s: &str) -> Vec<Annotation> {
    s.split("::")
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(Annotation::new)
        .collect()
}
