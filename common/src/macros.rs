/// Simple macro to generate PathBuf from a series of entries
///
#[macro_export]
macro_rules! makepath {
    ($($item:expr),+) => {
        [
        $(::std::path::PathBuf::from($item),)+
        ]
        .iter()
        .collect::<::std::path::PathBuf>()
    };
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    #[cfg(unix)]
    #[test]
    fn test_makepath() {
        let p = makepath!("a", "b", "config.hcl");
        assert_eq!(PathBuf::from("a/b/config.hcl"), p);
    }
}
