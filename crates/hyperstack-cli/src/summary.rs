use console::Style;
use hyperstack_core::dataset::AnyHyperstack;
use hyperstack_core::io::stack_file::StackHeader;
use hyperstack_core::pipeline::config::PipelineConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();

    print_title(&s, "Hyperstack Pipeline");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!();

    if config.steps.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Steps"),
            s.disabled.apply_to("none (copy only)")
        );
    } else {
        println!("  {}", s.header.apply_to("Steps"));
        for (i, step) in config.steps.iter().enumerate() {
            println!(
                "    {}. {}",
                s.label.apply_to(i + 1),
                s.method.apply_to(step)
            );
        }
    }
    println!();
}

/// Print the layout of a hyperstack: one row per axis.
pub fn print_layout(header: &StackHeader) {
    let s = Styles::new();

    print_title(&s, "Hyperstack Layout");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Sample type"),
        s.value.apply_to(header.sample_type)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(
            header
                .dims
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(" x ")
        )
    );
    if header.composite_channel_count > 1 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Composite"),
            s.method
                .apply_to(format!("{} channels", header.composite_channel_count))
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Composite"),
            s.disabled.apply_to("off")
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Axes"));
    for ((label, extent), cal) in header
        .axes
        .iter()
        .zip(&header.dims)
        .zip(&header.calibration)
    {
        println!(
            "    {:<12}{:>8}   {}",
            s.label.apply_to(label),
            s.value.apply_to(extent),
            s.label.apply_to(format!("step {cal}"))
        );
    }

    match header.data_byte_size() {
        Some(bytes) => println!(
            "\n  {:<14}{}",
            s.label.apply_to("Data size"),
            s.value
                .apply_to(format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0)))
        ),
        None => println!(
            "\n  {:<14}{}",
            s.label.apply_to("Data size"),
            s.disabled.apply_to("overflows address space")
        ),
    }
    println!();
}

/// Print a before/after comparison of a restructuring command.
pub fn print_reshape_summary(action: &str, before: &AnyHyperstack, after: &AnyHyperstack) {
    let s = Styles::new();

    print_title(&s, action);

    for (i, label) in after.axes().iter().enumerate() {
        let old = before.dims()[i];
        let new = after.dims()[i];
        let extent = if old == new {
            s.label.apply_to(format!("{new}"))
        } else {
            s.value.apply_to(format!("{old} -> {new}"))
        };
        println!("    {:<12}{}", s.label.apply_to(label), extent);
    }
    if before.composite_channel_count() != after.composite_channel_count() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("composite"),
            s.method.apply_to(format!(
                "{} -> {}",
                before.composite_channel_count(),
                after.composite_channel_count()
            ))
        );
    }
    println!();
}
