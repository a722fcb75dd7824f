//! Postfix evaluation against an independent recursive-descent reading of
//! the infix source.

use std::iter::Peekable;
use std::str::Chars;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rpnlogic::{evaluate, Assignment, Converter, ExprError};

type Reader<'a> = Peekable<Chars<'a>>;

/// Evaluates infix text directly, one grammar rule per precedence level:
///
/// iff     := implies ('=' implies)*
/// implies := or ('>' or)*
/// or      := and ('|' and)*
/// and     := unary ('&' unary)*
/// unary   := '~' unary | atom
/// atom    := letter | '(' iff ')'
struct Reference<'a> {
    assignment: &'a Assignment,
}

impl Reference<'_> {
    fn eval(&self, src: &str) -> Option<bool> {
        let mut chars = src.chars().peekable();
        let value = self.iff(&mut chars)?;
        chars.peek().is_none().then_some(value)
    }

    fn iff(&self, chars: &mut Reader) -> Option<bool> {
        let mut left = self.implies(chars)?;
        while chars.next_if_eq(&'=').is_some() {
            let right = self.implies(chars)?;
            left = left == right;
        }
        Some(left)
    }

    fn implies(&self, chars: &mut Reader) -> Option<bool> {
        let mut left = self.or(chars)?;
        while chars.next_if_eq(&'>').is_some() {
            let right = self.or(chars)?;
            left = !left || right;
        }
        Some(left)
    }

    fn or(&self, chars: &mut Reader) -> Option<bool> {
        let mut left = self.and(chars)?;
        while chars.next_if_eq(&'|').is_some() {
            let right = self.and(chars)?;
            left = left || right;
        }
        Some(left)
    }

    fn and(&self, chars: &mut Reader) -> Option<bool> {
        let mut left = self.unary(chars)?;
        while chars.next_if_eq(&'&').is_some() {
            let right = self.unary(chars)?;
            left = left && right;
        }
        Some(left)
    }

    fn unary(&self, chars: &mut Reader) -> Option<bool> {
        if chars.next_if_eq(&'~').is_some() {
            return self.unary(chars).map(|v| !v);
        }
        self.atom(chars)
    }

    fn atom(&self, chars: &mut Reader) -> Option<bool> {
        match chars.next()? {
            '(' => {
                let value = self.iff(chars)?;
                chars.next_if_eq(&')').map(|_| value)
            }
            c if c.is_ascii_alphabetic() => self.assignment.get(c),
            _ => None,
        }
    }
}

fn random_infix<R: Rng>(rng: &mut R, variables: &[char], depth: usize) -> String {
    if depth == 0 || rng.gen_bool(0.25) {
        return variables[rng.gen_range(0..variables.len())].to_string();
    }

    match rng.gen_range(0..6) {
        0 => format!("~{}", random_infix(rng, variables, depth - 1)),
        1 => format!("({})", random_infix(rng, variables, depth - 1)),
        n => {
            let op = ['&', '|', '>', '='][n - 2];
            format!(
                "{}{op}{}",
                random_infix(rng, variables, depth - 1),
                random_infix(rng, variables, depth - 1)
            )
        }
    }
}

fn all_assignments(variables: &[char]) -> Vec<Assignment> {
    (0..1usize << variables.len())
        .map(|bits| {
            variables
                .iter()
                .enumerate()
                .map(|(i, &v)| (v, (bits >> i) & 1 == 1))
                .collect()
        })
        .collect()
}

#[test]
fn postfix_agrees_with_recursive_descent() -> Result<(), ExprError> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let variables = ['P', 'Q', 'R', 'S'];
    let converter = Converter::default();

    for _ in 0..500 {
        let infix = random_infix(&mut rng, &variables, 6);
        let postfix = converter.convert_str(&infix)?;

        for assignment in all_assignments(&variables) {
            let reference = Reference {
                assignment: &assignment,
            }
            .eval(&infix);
            assert_eq!(
                Some(evaluate(&postfix, &assignment)?),
                reference,
                "{infix} -> {postfix}"
            );
        }
    }

    Ok(())
}

#[test]
fn reference_reads_left_grouping() {
    let assignment: Assignment = [('A', false), ('B', true), ('C', false)].into_iter().collect();
    let reference = Reference {
        assignment: &assignment,
    };

    // (A>B)>C
    assert_eq!(reference.eval("A>B>C"), Some(false));
    assert_eq!(reference.eval("A>(B>C)"), Some(true));
    assert_eq!(reference.eval("(A"), None);
}
