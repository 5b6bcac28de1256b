#[cfg(test)]
mod tests {
    use qrgrid_core::logging::init_tracing;
    use qrgrid_core::reassembly::combine;

    #[test]
    fn init_is_idempotent_and_logging_does_not_disturb_results() {
        let first = init_tracing("qrgrid_core=debug");
        let second = init_tracing("qrgrid_core=debug");
        assert!(first.is_ok());
        assert!(second.is_err());

        assert_eq!(combine(&["IDX:001:b", "noise", "IDX:000:a"]).unwrap(), "ab");
    }
}
