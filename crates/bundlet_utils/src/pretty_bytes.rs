/// Formats a byte count for progress messages, matching the terminal
/// summary style of the output printer.
pub fn pretty_bytes(bytes: usize) -> String {
  if bytes < 1024 {
    return format!("{bytes} B");
  }
  let kib = bytes as f64 / 1024.0;
  if kib < 1024.0 {
    format!("{kib:.2} kB")
  } else {
    format!("{:.2} MB", kib / 1024.0)
  }
}

#[test]
fn test_pretty_bytes() {
  assert_eq!(pretty_bytes(0), "0 B");
  assert_eq!(pretty_bytes(1023), "1023 B");
  assert_eq!(pretty_bytes(1536), "1.50 kB");
  assert_eq!(pretty_bytes(5 * 1024 * 1024), "5.00 MB");
}
