use super::expr::Roll;
use super::faces::FaceCountMap;
use super::result::{Draws, RollResult};
use crate::common::{Int, NonZeroUInt, UInt};

/// Renders rolls and their results. The provided methods produce the
/// canonical plain-text notation; implementors override the hooks they need.
pub trait Stringify {
    fn str_roll(&mut self, roll: &Roll) -> String {
        let positive = self.str_faces(&roll.positive);
        let negative = self.str_faces(&roll.negative);
        let mut ret = join_signed(positive, negative, roll.negative.len() > 1);
        ret.push_str(&self.str_offset(roll));
        if ret.is_empty() {
            ret.push('0');
        }
        ret
    }

    fn str_faces(&mut self, faces: &FaceCountMap) -> String {
        faces.to_string()
    }

    fn str_offset(&mut self, roll: &Roll) -> String {
        let offset = roll.offset;
        if !roll.has_dice() {
            return if offset == 0 {
                String::new()
            } else {
                offset.to_string()
            };
        }
        match offset {
            0 => String::new(),
            x if x > 0 => format!(" + {}", x),
            x => format!(" - {}", x.unsigned_abs()),
        }
    }

    fn str_value(&mut self, value: UInt, _faces: NonZeroUInt) -> String {
        value.to_string()
    }

    /// Joins the outcomes of one sign. Die sizes are only bracketed apart when
    /// there is more than one of them.
    fn str_draws(&mut self, draws: &[Draws]) -> String {
        let grouped = draws.len() > 1;
        draws
            .iter()
            .map(|d| {
                let inner = d
                    .values
                    .iter()
                    .map(|&v| self.str_value(v, d.faces))
                    .collect::<Vec<_>>()
                    .join(" + ");
                if grouped && d.values.len() > 1 {
                    format!("({})", inner)
                } else {
                    inner
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }

    fn str_detailed(&mut self, result: &RollResult) -> String {
        let positive = self.str_draws(result.positive());
        let negative = self.str_draws(result.negative());
        let mut ret = join_signed(positive, negative, result.negative().len() > 1);
        ret.push_str(&self.str_offset(result.roll()));
        if ret.is_empty() {
            ret.push('0');
        }
        ret
    }

    fn str_total(&mut self, sum: Int) -> String {
        sum.to_string()
    }

    fn str_result(&mut self, result: &RollResult) -> String {
        let detailed = self.str_detailed(result);
        let total = self.str_total(result.sum());
        format!("{} = {}", detailed, total)
    }
}

fn join_signed(positive: String, negative: String, parenthesize: bool) -> String {
    let mut ret = positive;
    if !negative.is_empty() {
        ret.push_str(if ret.is_empty() { "-" } else { " - " });
        if parenthesize {
            ret.push('(');
            ret.push_str(&negative);
            ret.push(')');
        } else {
            ret.push_str(&negative);
        }
    }
    ret
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for SimpleStringifier {}

/// Marks dice that landed on 1 or on their highest face in bold and puts the
/// total in backticks.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn str_value(&mut self, value: UInt, faces: NonZeroUInt) -> String {
        if value == 1 || value == faces.get() {
            format!("**{}**", value)
        } else {
            value.to_string()
        }
    }

    fn str_total(&mut self, sum: Int) -> String {
        format!("`{}`", sum)
    }
}
