use draughts_core::perft::perft_root;

#[test]
fn test_perft() {
    let nodes = perft_root(3);
    assert_eq!(nodes, 302);
}
