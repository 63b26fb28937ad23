//! Property-based tests for lowering and both optimizers.
//!
//! Random trees are generated with proptest and checked for:
//! 1. Folding agrees with evaluating the expression directly.
//! 2. Idempotence: optimize(optimize(t)) == optimize(t).
//! 3. Lowered control flow never jumps to an undefined label.
//! 4. Fresh names are strictly increasing and never repeat.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use tacopt_core::{
    AstNode, AstNodeKind, BinaryOperator as Op, PassOptions, TacOp, Value, lower_ast_to_tac, optimize_tree,
};

// -- Strategies --

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "x", "y"]).prop_map(str::to_string)
}

fn operator_strategy() -> impl Strategy<Value = Op> {
    prop::sample::select(vec![
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::Div,
        Op::FloorDiv,
        Op::Mod,
        Op::Pow,
        Op::BitAnd,
        Op::BitXor,
        Op::Eq,
        Op::Lt,
        Op::GtE,
    ])
}

fn literal_strategy() -> impl Strategy<Value = AstNode> {
    prop_oneof![
        (-20i64..20).prop_map(AstNode::int),
        any::<bool>().prop_map(AstNode::boolean),
        (-4i32..4).prop_map(|n| AstNode::float(n as f64 * 0.5)),
        Just(AstNode::string("ab")),
        Just(AstNode::literal(Value::Null)),
    ]
}

fn expr_strategy() -> impl Strategy<Value = AstNode> {
    let leaf = prop_oneof![literal_strategy(), identifier_strategy().prop_map(|n| AstNode::ident(&n))];
    leaf.prop_recursive(5, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), operator_strategy(), inner.clone()).prop_map(|(l, op, r)| AstNode::binary(l, op, r)),
            (identifier_strategy(), prop::collection::vec(inner, 0..3))
                .prop_map(|(f, args)| AstNode::call(AstNode::ident(&f), args)),
        ]
    })
}

fn stmt_strategy() -> impl Strategy<Value = AstNode> {
    let simple = prop_oneof![
        (identifier_strategy(), expr_strategy()).prop_map(|(t, v)| AstNode::assign(vec![AstNode::ident(&t)], v)),
        expr_strategy().prop_map(AstNode::expr_stmt),
        Just(AstNode::unsupported("While")),
    ];
    simple.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            (expr_strategy(), prop::collection::vec(inner.clone(), 0..3), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(test, body, orelse)| AstNode::if_else(test, body, orelse)),
            (identifier_strategy(), expr_strategy(), prop::collection::vec(inner, 0..3))
                .prop_map(|(t, it, body)| AstNode::for_loop(AstNode::ident(&t), it, body)),
        ]
    })
}

fn program_strategy() -> impl Strategy<Value = AstNode> {
    prop::collection::vec(stmt_strategy(), 0..5).prop_map(AstNode::block)
}

/// Integer-only expression together with its value computed independently,
/// or `None` when it overflows.
fn int_expr_strategy() -> impl Strategy<Value = (AstNode, Option<i64>)> {
    let leaf = (-1000i64..1000).prop_map(|n| (AstNode::int(n), Some(n)));
    leaf.prop_recursive(6, 64, 2, |inner| {
        (inner.clone(), prop::sample::select(vec![Op::Add, Op::Sub, Op::Mul]), inner).prop_map(
            |((l, lv), op, (r, rv))| {
                let value = match (lv, rv) {
                    (Some(a), Some(b)) => match op {
                        Op::Add => a.checked_add(b),
                        Op::Sub => a.checked_sub(b),
                        _ => a.checked_mul(b),
                    },
                    _ => None,
                };
                (AstNode::binary(l, op, r), value)
            },
        )
    })
}

// -- Helpers --

fn fresh_index(name: &str, prefix: char) -> Option<usize> {
    name.strip_prefix(prefix)?.parse().ok()
}

fn fresh_names(ops: &[TacOp]) -> Vec<usize> {
    let mut seen = Vec::new();
    for op in ops {
        match op {
            TacOp::BinaryAssign { dst, .. } | TacOp::Call { dst: Some(dst), .. } => {
                if let Some(n) = fresh_index(dst, 't') {
                    seen.push(n);
                }
            }
            TacOp::Label { name } => {
                if let Some(n) = fresh_index(name, 'L') {
                    seen.push(n);
                }
            }
            _ => {}
        }
    }
    seen
}

// -- Properties --

proptest! {
    #[test]
    fn folding_matches_direct_evaluation((tree, expected) in int_expr_strategy()) {
        let out = optimize_tree(tree, &PassOptions::default()).expect("optimization failed");
        if let Some(v) = expected {
            prop_assert_eq!(out, AstNode::int(v));
        }
    }

    #[test]
    fn optimize_tree_is_idempotent(tree in program_strategy()) {
        let options = PassOptions::default();
        let once = optimize_tree(tree, &options).expect("optimization failed");
        let twice = optimize_tree(once.clone(), &options).expect("optimization failed");
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn optimized_expressions_have_no_foldable_pairs(tree in expr_strategy()) {
        fn check(node: &AstNode) -> bool {
            match node.get_kind() {
                AstNodeKind::BinaryOp { left, op, right } => {
                    let both_literal = match (left.get_kind().as_literal(), right.get_kind().as_literal()) {
                        (Some(l), Some(r)) => tacopt_core::ir::eval::fold_binary(*op, l, r).is_ok(),
                        _ => false,
                    };
                    !both_literal && check(left) && check(right)
                }
                AstNodeKind::Call { args, .. } => args.iter().all(check),
                _ => true,
            }
        }
        let out = optimize_tree(tree, &PassOptions::default()).expect("optimization failed");
        prop_assert!(check(&out));
    }

    #[test]
    fn lowered_jumps_always_land_on_a_label(tree in program_strategy()) {
        let ops = lower_ast_to_tac(&tree, &PassOptions::default()).expect("lowering failed");
        let mut defined: HashMap<&str, usize> = HashMap::new();
        for op in &ops {
            if let TacOp::Label { name } = op {
                *defined.entry(name.as_str()).or_default() += 1;
            }
        }
        prop_assert!(defined.values().all(|&n| n == 1));
        for op in &ops {
            if let Some(target) = op.jump_target() {
                prop_assert!(defined.contains_key(target));
            }
        }
    }

    #[test]
    fn fresh_names_never_repeat(tree in program_strategy()) {
        let ops = lower_ast_to_tac(&tree, &PassOptions::default()).expect("lowering failed");
        let names = fresh_names(&ops);
        let unique: HashSet<usize> = names.iter().copied().collect();
        prop_assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn temporaries_are_defined_in_increasing_order(tree in expr_strategy()) {
        let stmt = AstNode::expr_stmt(tree);
        let ops = lower_ast_to_tac(&stmt, &PassOptions::default()).expect("lowering failed");
        let names = fresh_names(&ops);
        prop_assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
