use tacopt_core::ast::err::StructuralError;
use tacopt_core::{
    AstNode, BinaryOperator, Level, Location, PassError, PassOptions, TacoptErrorExt, generate_error_report,
    lower_ast_to_tac, optimize_tree, run_pipeline,
};

/// `1 + (1 + (1 + ...))`, `depth` operators deep.
fn nested_sum(depth: usize) -> AstNode {
    let mut node = AstNode::ident("x");
    for _ in 0..depth {
        node = AstNode::binary(AstNode::int(1), BinaryOperator::Add, node);
    }
    node
}

#[test]
fn assignment_into_a_call_is_a_structural_error() {
    // f() = 1
    let tree = AstNode::assign(vec![AstNode::call(AstNode::ident("f"), vec![])], AstNode::int(1));

    let err = lower_ast_to_tac(&tree, &PassOptions::default()).unwrap_err();

    match &err {
        PassError::Structural(e) => {
            assert_eq!(e.message(), "assignment target must be a name, found Call");
            assert_eq!(e.level(), Level::Error);
        }
        other => panic!("expected a structural error, got {:?}", other),
    }
}

#[test]
fn assignment_without_targets_is_rejected() {
    let tree = AstNode::assign(vec![], AstNode::int(1));

    let err = lower_ast_to_tac(&tree, &PassOptions::default()).unwrap_err();

    assert!(matches!(err, PassError::Structural(_)));
}

#[test]
fn loop_target_must_be_a_name() {
    let tree = AstNode::for_loop(AstNode::int(3), AstNode::ident("xs"), vec![]);

    let err = lower_ast_to_tac(&tree, &PassOptions::default()).unwrap_err();

    assert_eq!(err.message(), "loop target must be a name, found Literal");
}

#[test]
fn structural_error_is_never_masked_as_empty_output() {
    let tree = AstNode::block(vec![
        AstNode::assign(vec![AstNode::ident("ok")], AstNode::int(1)),
        AstNode::assign(vec![AstNode::int(2)], AstNode::int(3)),
    ]);

    assert!(lower_ast_to_tac(&tree, &PassOptions::default()).is_err());
    assert!(run_pipeline(tree, &PassOptions::default()).is_err());
}

#[test]
fn lowering_past_the_depth_limit_fails() {
    let options = PassOptions::default().with_max_depth(10);

    let err = lower_ast_to_tac(&nested_sum(20), &options).unwrap_err();

    match err {
        PassError::ResourceLimit(e) => {
            assert_eq!(e.limit(), 10);
            assert_eq!(e.level(), Level::Critical);
        }
        other => panic!("expected a resource limit error, got {:?}", other),
    }
}

#[test]
fn tree_optimizer_respects_the_depth_limit() {
    let options = PassOptions::default().with_max_depth(10);

    let err = optimize_tree(nested_sum(20), &options).unwrap_err();

    assert!(matches!(err, PassError::ResourceLimit(_)));
}

#[test]
fn rendered_callee_respects_the_depth_limit() {
    let options = PassOptions::default().with_max_depth(10);
    // (1 + (1 + ... x))()
    let tree = AstNode::expr_stmt(AstNode::call(nested_sum(20), vec![]));

    let err = lower_ast_to_tac(&tree, &options).unwrap_err();

    assert!(matches!(err, PassError::ResourceLimit(_)));
    assert!(lower_ast_to_tac(&AstNode::expr_stmt(AstNode::call(nested_sum(5), vec![])), &options).is_ok());
}

#[test]
fn trees_within_the_limit_are_accepted() {
    let options = PassOptions::default().with_max_depth(10);

    assert!(lower_ast_to_tac(&nested_sum(10), &options).is_ok());
    assert!(optimize_tree(nested_sum(10), &options).is_ok());
    assert!(lower_ast_to_tac(&nested_sum(200), &PassOptions::default()).is_ok());
}

#[test]
fn error_report_names_level_location_and_message() {
    let target = AstNode::int(2).with_location(Location::new("main.py".to_string(), 3, 1));
    let tree = AstNode::assign(vec![target], AstNode::int(3));

    let err = lower_ast_to_tac(&tree, &PassOptions::default()).unwrap_err();

    assert_eq!(
        generate_error_report(&err),
        "TACOPT | ERROR | main.py:3:1 | assignment target must be a name, found Literal"
    );
    assert_eq!(err.to_string(), "assignment target must be a name, found Literal (at main.py:3:1)");
}

#[test]
fn dyn_error_debug_includes_issuer() {
    let err = StructuralError::new("bad tree".to_string(), None, None);
    let dyn_err: &dyn TacoptErrorExt = &err;

    assert_eq!(
        format!("{:?}", dyn_err),
        "TACOPT | ERROR | unknown | tacopt_core::ast | span:none | bad tree"
    );
}
