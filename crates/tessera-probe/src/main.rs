use anyhow::{bail, Context as _, Result};

use tessera_engine::alloc::AllocationChange;
use tessera_engine::caps::{hash, Backend, Extension};
use tessera_engine::device::{Context, ContextInit};
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::masquerade::{Masquerade, Preset};

const USAGE: &str = "\
usage: tessera-probe <command> [args]

commands:
  encode <backend> [extension...]      print the extensions hash
  decode <hash>                        print backend and extensions of a hash
  complement <backend> [extension...]  print the backend's other extensions
  presets [file.json]                  list masquerade presets
  preset <identifier> [file.json]      show what a preset conceals
  probe [backend]                      open a headless context and report it

backends: webgl1, webgl2
masquerade for `probe`: TESSERA_MSQRD_HASH or TESSERA_MSQRD_PRESET";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };

    match command.as_str() {
        "encode" => encode(rest),
        "decode" => decode(rest),
        "complement" => complement(rest),
        "presets" => list_presets(rest),
        "preset" => show_preset(rest),
        "probe" => probe(rest),
        "help" | "-h" | "--help" => {
            println!("{USAGE}");
            Ok(())
        }
        other => bail!("unknown command {other:?}\n\n{USAGE}"),
    }
}

fn backend_and_extensions(args: &[String]) -> Result<(Backend, Vec<Extension>)> {
    let (backend, names) = args.split_first().context("missing backend")?;
    let backend: Backend = backend.parse()?;
    let extensions = Extension::parse_all(names)?;
    Ok((backend, extensions))
}

fn print_list(title: &str, extensions: &[Extension]) {
    println!("{title} ({}):", extensions.len());
    for ext in extensions {
        println!("  {ext}");
    }
}

fn encode(args: &[String]) -> Result<()> {
    let (backend, extensions) = backend_and_extensions(args)?;
    println!("{}", hash::encode(backend, &extensions));
    Ok(())
}

fn decode(args: &[String]) -> Result<()> {
    let h = args.first().context("missing hash")?;
    let (backend, extensions) = hash::decode(h).with_context(|| format!("invalid hash {h:?}"))?;
    println!("backend: {backend}");
    print_list("extensions", &extensions);
    Ok(())
}

fn complement(args: &[String]) -> Result<()> {
    let (backend, extensions) = backend_and_extensions(args)?;
    print_list("complement", &hash::complement(backend, &extensions));
    Ok(())
}

fn load_presets(path: Option<&String>) -> Result<Vec<Preset>> {
    match path {
        None => Ok(Preset::builtin()),
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read presets from {path}"))?;
            Ok(Preset::parse_list(&json)?)
        }
    }
}

fn list_presets(args: &[String]) -> Result<()> {
    for preset in load_presets(args.first())? {
        let source = match &preset.extensions_hash {
            Some(h) => format!("hash {h}"),
            None => format!(
                "{} strive, {} conceal",
                preset.extensions_to_strive.len(),
                preset.extensions_to_conceal.len()
            ),
        };
        println!("{:<32} {:<7} {source}", preset.identifier, preset.backend);
    }
    Ok(())
}

fn show_preset(args: &[String]) -> Result<()> {
    let identifier = args.first().context("missing preset identifier")?;
    let presets = load_presets(args.get(1))?;
    let mask = Masquerade::from_preset(identifier, &presets)?;

    println!("backend: {}", mask.backend());
    print_list("strive", mask.extensions_to_strive());
    print_list("conceal", mask.extensions_to_conceal());
    if !mask.functions_to_undefine().is_empty() {
        println!("undefined functions: {}", mask.functions_to_undefine().join(", "));
    }
    Ok(())
}

fn probe(args: &[String]) -> Result<()> {
    let mut init = ContextInit::from_env();
    if let Some(backend) = args.first() {
        init.backend = backend.parse()?;
    }

    let ctx = pollster::block_on(Context::new(init))?;
    let info = ctx.adapter_info();
    let caps = ctx.capabilities();

    println!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);
    println!("backend: {}", caps.backend());
    println!("hash:    {}", caps.hash());
    print_list("extensions", &caps.extensions());
    if caps.masquerade().is_some() {
        print_list("concealed", &caps.concealed());
    }

    // Exercise the register with a couple of throwaway resources.
    ctx.allocation_register()
        .borrow_mut()
        .subscribe(|change: &AllocationChange| log::info!("gpu memory: {}", change.pretty));

    let mut quad = ctx.buffer("probe-quad");
    quad.initialize(wgpu::BufferUsages::VERTEX, 0)?;
    quad.data_pod(ctx.queue(), &[0.0f32, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])?;

    let mut target = ctx.texture_2d("probe-target");
    target.initialize(
        256,
        256,
        wgpu::TextureFormat::Rgba8Unorm,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    )?;

    println!("allocations: {}", ctx.allocation_register().borrow().report());

    target.uninitialize()?;
    quad.uninitialize()?;
    Ok(())
}
