/// Warm-to-teal section palette, cycled by stage position.
pub const STAGE_PALETTE: [&str; 4] = ["#E76F51", "#F4A261", "#E9C46A", "#2A9D8F"];

pub fn stage_color(index: usize) -> &'static str {
    STAGE_PALETTE[index % STAGE_PALETTE.len()]
}
