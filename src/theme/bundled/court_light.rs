//! Court Light - daylight variant for bright terminals

pub const THEME: &str = r##"# Court Light theme for courtside

[meta]
name = "Court Light"
version = 1
author = "courtside"

[ui]
background = "#fafafa"
foreground = "#383a42"
border = "#d0d3d9"
border_focused = "#c18401"
title = "#986801"
status_bar = "#4f525e"
selection_bg = "#e5e9f0"
selection_fg = "#1f2328"
muted = "#8b8f99"
error = "#e45649"
success = "#50a14f"

[tones]
gray = "#8b8f99"
blue = "#4078f2"
green = "#50a14f"
yellow = "#c18401"
pink = "#d1508f"
purple = "#a626a4"
cyan = "#0184bc"
orange = "#d75f00"
"##;
