#[cfg(test)]
mod navigation_tests {
    use series_navigator::NavigationStack;

    #[test]
    fn test_push_after_back_discards_forward_branch() {
        let mut stack = NavigationStack::new();
        stack.push("A");
        stack.push("B");
        stack.push("C");

        assert_eq!(stack.back(), Some(&"B"));
        assert_eq!(stack.back(), Some(&"A"));
        stack.push("D");

        assert_eq!(stack.entries(), &["A", "D"]);
        assert_eq!(stack.current(), Some(&"D"));
        assert!(!stack.can_go_forward());
        assert!(stack.can_go_back());
    }

    #[test]
    fn test_back_and_forward_stop_at_the_ends() {
        let mut stack = NavigationStack::new();
        assert_eq!(stack.back(), None);
        assert_eq!(stack.forward(), None);

        stack.push(1);
        stack.push(2);
        assert_eq!(stack.forward(), None);
        assert_eq!(stack.back(), Some(&1));
        assert_eq!(stack.back(), None);
        assert_eq!(stack.cursor(), Some(0));
        assert_eq!(stack.forward(), Some(&2));
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut stack = NavigationStack::new();
        stack.push("A");
        stack.push("B");
        stack.reset();

        assert!(stack.is_empty());
        assert_eq!(stack.cursor(), None);
        assert!(!stack.can_go_back());
        assert!(!stack.can_go_forward());
    }
}
