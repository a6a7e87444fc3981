// Linux-specific helpers: /proc/cpuinfo and /proc/sys/kernel.

/// Read first "model name" from /proc/cpuinfo (Linux). Used when sysinfo has no brand string.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    if !cfg!(target_os = "linux") {
        return None;
    }
    let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    parse_cpu_model(&content)
}

/// Read a single-line value from /proc/sys/kernel/<name>, e.g. `ostype` or `version`.
pub(super) fn read_kernel_field_linux(name: &str) -> Option<String> {
    if !cfg!(target_os = "linux") {
        return None;
    }
    let v = std::fs::read_to_string(format!("/proc/sys/kernel/{}", name)).ok()?;
    let v = v.trim();
    if v.is_empty() {
        return None;
    }
    Some(v.to_string())
}

fn parse_cpu_model(content: &str) -> Option<String> {
    // ARM kernels report "Processor" or "Hardware" instead of "model name".
    ["model name", "Processor", "Hardware"]
        .iter()
        .find_map(|key| {
            content.lines().find_map(|line| {
                let (k, v) = line.split_once(':')?;
                if k.trim() != *key {
                    return None;
                }
                let v = v.trim();
                (!v.is_empty() && v != "cpu0").then(|| v.to_string())
            })
        })
}
