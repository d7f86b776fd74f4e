//! Location-aware traversal and variable utilities.
//!
//! Rewrite output mixes parsed nodes (which carry locations) with
//! synthesized nodes (which do not). The traversals here thread the nearest
//! known location down the tree so every node can be reported somewhere
//! sensible. The variable helpers classify unification variables and invent
//! names guaranteed not to collide with anything already in a tree.

use crate::ast::{Expr, ExprKind, Name};
use crate::loc::Loc;
use std::collections::HashSet;

// ────────────────────────────────────────────
// Traversal with locations
// ────────────────────────────────────────────

/// Pairs each direct child of `expr` with the best location known for it.
///
/// A child's own location wins; a synthetic child falls back to `expr`'s
/// location, or to `enclosing` when `expr` is itself synthetic.
#[must_use]
pub fn children_with_loc<'a>(enclosing: &Loc, expr: &'a Expr) -> Vec<(Loc, &'a Expr)> {
    let here = expr.loc.or(enclosing).clone();
    expr.children()
        .into_iter()
        .map(|child| (child.loc.or(&here).clone(), child))
        .collect()
}

/// Flattens the subtree rooted at `expr` in depth-first pre-order, pairing
/// every node with its nearest known location.
///
/// The root appears first; each node's attached location, when present,
/// supersedes the inherited one for all of its descendants.
#[must_use]
pub fn flatten_with_loc<'a>(enclosing: &Loc, expr: &'a Expr) -> Vec<(Loc, &'a Expr)> {
    let mut out = Vec::new();
    flatten_into(enclosing, expr, &mut out);
    out
}

fn flatten_into<'a>(enclosing: &Loc, expr: &'a Expr, out: &mut Vec<(Loc, &'a Expr)>) {
    let here = expr.loc.or(enclosing).clone();
    out.push((here.clone(), expr));
    for child in expr.children() {
        flatten_into(&here, child, out);
    }
}

// ────────────────────────────────────────────
// Unification variables
// ────────────────────────────────────────────

/// Whether `name` is a unification variable: one lower-case ASCII letter
/// followed only by digits (`x`, `f`, `x1`, `y12`).
#[must_use]
pub fn is_unify_var(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase() && chars.all(|c| c.is_ascii_digit())
}

/// Builds a synthetic variable reference.
#[must_use]
pub fn make_var(name: impl Into<String>) -> Expr {
    ExprKind::Var(Name::unqualified(name)).into()
}

/// The name behind a bare variable reference, if `expr` is one.
///
/// Qualified names and operator references do not count; they denote a
/// known binding rather than a substitutable variable.
#[must_use]
pub fn as_var(expr: &Expr) -> Option<&str> {
    match &expr.kind {
        ExprKind::Var(name) if !name.is_qualified() && !name.is_operator() => {
            Some(name.name.as_str())
        }
        _ => None,
    }
}

/// Whether `expr` is a bare variable reference.
#[must_use]
pub fn is_var(expr: &Expr) -> bool {
    as_var(expr).is_some()
}

/// Picks a variable name not occurring anywhere in `expr`.
///
/// Candidates are tried as `a` through `z`, then `a1` through `z1`, and so
/// on. A candidate is also skipped when the tree already uses the name one
/// more trailing `1` would produce, so later synthesis rounds stay
/// collision-free.
#[must_use]
pub fn fresh_var(expr: &Expr) -> String {
    let mut used = HashSet::new();
    collect_idents(expr, &mut used);
    for round in 0usize.. {
        for letter in b'a'..=b'z' {
            let letter = letter as char;
            let candidate = if round == 0 {
                letter.to_string()
            } else {
                format!("{letter}{round}")
            };
            let successor = format!("{candidate}1");
            if !used.contains(&candidate) && !used.contains(&successor) {
                return candidate;
            }
        }
    }
    unreachable!("the candidate sequence is unbounded")
}

/// Collects every unqualified identifier bound or referenced in the tree.
fn collect_idents(expr: &Expr, out: &mut HashSet<String>) {
    match &expr.kind {
        ExprKind::Var(name) if !name.is_qualified() => {
            out.insert(name.name.clone());
        }
        ExprKind::Lambda(params, _) => {
            for param in params {
                out.insert(param.clone());
            }
        }
        _ => {}
    }
    for child in expr.children() {
        collect_idents(child, out);
    }
}

/// Named identifiers referenced by the tree, first occurrence first.
///
/// Unification variables and the wildcard are skipped; qualified names keep
/// their qualifier and duplicates are dropped. Only reference nodes count:
/// a section like `(+)` is one, the spelling of an infix application is
/// not.
#[must_use]
pub fn named_idents(expr: &Expr) -> Vec<String> {
    let mut names = Vec::new();
    collect_named(expr, &mut names);
    names
}

fn collect_named(expr: &Expr, out: &mut Vec<String>) {
    if let ExprKind::Var(name) = &expr.kind {
        let rendered = name.to_string();
        if !is_unify_var(&rendered) && !out.contains(&rendered) {
            out.push(rendered);
        }
    }
    for child in expr.children() {
        collect_named(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_expr;

    fn expr(src: &str) -> Expr {
        parse_expr(src, "rules.yaml").unwrap()
    }

    fn app(fun: Expr, arg: Expr) -> Expr {
        ExprKind::App(Box::new(fun), Box::new(arg)).into()
    }

    // -- Traversal --

    #[test]
    fn flatten_is_preorder() {
        let e = expr("f (g x)");
        let rendered: Vec<String> = flatten_with_loc(&Loc::Synthetic, &e)
            .iter()
            .map(|(_, node)| node.to_string())
            .collect();
        assert_eq!(rendered, ["f (g x)", "f", "(g x)", "g x", "g", "x"]);
    }

    #[test]
    fn synthetic_nodes_inherit_the_nearest_location() {
        // A synthesized application around a parsed subtree.
        let parsed = expr("f x");
        let synthesized = app(parsed, make_var("y"));
        let outer = Loc::known("rules.yaml", 4, 2);

        let pairs = flatten_with_loc(&outer, &synthesized);
        // Root is synthetic: reported at the enclosing location.
        assert_eq!(pairs[0].0, outer);
        // Parsed nodes keep their own positions.
        assert_eq!(pairs[1].0, Loc::known("rules.yaml", 1, 1));
        // The synthesized argument inherits from the enclosing scope.
        assert_eq!(pairs[4].0, outer);
    }

    #[test]
    fn own_location_supersedes_inherited_one() {
        let e = expr("concat (map f x)");
        let outer = Loc::known("other.yaml", 9, 9);
        let children = children_with_loc(&outer, &e);

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].0, Loc::known("rules.yaml", 1, 1));
        assert_eq!(children[1].0, Loc::known("rules.yaml", 1, 8));
    }

    #[test]
    fn synthetic_children_fall_back_to_parent() {
        let tree = app(make_var("f"), make_var("x"));
        let outer = Loc::known("rules.yaml", 2, 5);
        let children = children_with_loc(&outer, &tree);

        assert!(children.iter().all(|(loc, _)| *loc == outer));
    }

    // -- Unification variables --

    #[test]
    fn unify_var_shape() {
        assert!(is_unify_var("x"));
        assert!(is_unify_var("f"));
        assert!(is_unify_var("x12"));
        assert!(!is_unify_var("xs"));
        assert!(!is_unify_var("X"));
        assert!(!is_unify_var("x1y"));
        assert!(!is_unify_var(""));
        assert!(!is_unify_var("Data.List.map"));
    }

    #[test]
    fn var_round_trip() {
        let v = make_var("x");
        assert!(v.loc.is_synthetic());
        assert!(is_var(&v));
        assert_eq!(as_var(&v), Some("x"));
        assert_eq!(as_var(&expr("[a]")), None);
    }

    #[test]
    fn qualified_and_operator_references_are_not_variables() {
        assert!(!is_var(&expr("Data.List.map")));
        assert!(!is_var(&expr("(+)")));
        assert!(is_var(&expr("concatMap")));
    }

    // -- Fresh variables --

    #[test]
    fn fresh_var_on_empty_tree_is_a() {
        let lit: Expr = ExprKind::Lit(crate::ast::Literal::Int(1)).into();
        assert_eq!(fresh_var(&lit), "a");
    }

    #[test]
    fn fresh_var_skips_used_names() {
        assert_eq!(fresh_var(&expr("a b")), "c");
    }

    #[test]
    fn fresh_var_skips_names_with_taken_successor() {
        // `b` itself is free but `b1` is taken, so `b` is unusable.
        assert_eq!(fresh_var(&expr("a (a1 b1)")), "c");
    }

    #[test]
    fn fresh_var_counts_lambda_binders() {
        assert_eq!(fresh_var(&expr("\\a -> f a")), "b");
    }

    #[test]
    fn fresh_var_moves_to_numbered_round() {
        // Occupy the whole first round.
        let all: Vec<String> = (b'a'..=b'z').map(|c| (c as char).to_string()).collect();
        let src = all.join(" ");
        assert_eq!(fresh_var(&expr(&src)), "a1");
    }

    // -- Named identifiers --

    #[test]
    fn named_idents_in_first_occurrence_order() {
        assert_eq!(named_idents(&expr("concat (map f x)")), ["concat", "map"]);
    }

    #[test]
    fn named_idents_deduplicates() {
        assert_eq!(named_idents(&expr("map f (map g x)")), ["map"]);
    }

    #[test]
    fn named_idents_see_sections_but_not_infix_spellings() {
        assert_eq!(named_idents(&expr("foldr (+) 0 x")), ["foldr", "+"]);
        assert_eq!(named_idents(&expr("_ ++ xs")), ["xs"]);
    }

    #[test]
    fn named_idents_keep_qualifiers() {
        assert_eq!(
            named_idents(&expr("Data.Map.lookup k m")),
            ["Data.Map.lookup"]
        );
    }
}
