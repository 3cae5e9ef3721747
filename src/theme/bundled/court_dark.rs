//! Court Dark - default theme, hardwood tones on a night court

pub const THEME: &str = r##"# Court Dark theme for courtside

[meta]
name = "Court Dark"
version = 1
author = "courtside"

[ui]
background = "#1f2428"
foreground = "#d8dee4"
border = "#3b444c"
border_focused = "#e0a458"
title = "#e0a458"
status_bar = "#a8b3bd"
selection_bg = "#2f3a44"
selection_fg = "#f2f5f7"
muted = "#7d8a96"
error = "#e06c75"
success = "#98c379"
border_type = "rounded"

[tones]
gray = "#7d8a96"
blue = "#61afef"
green = "#98c379"
yellow = "#e5c07b"
pink = "#f08cb6"
purple = "#c678dd"
cyan = "#56b6c2"
orange = "#e0a458"
"##;
