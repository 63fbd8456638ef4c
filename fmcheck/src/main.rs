//! A typechecker for a lambda calculus with erasure, boxes, and self types.

mod error;
mod opt;
mod path_read;

use clap::Parser;
use error::Error;
use formality::{Ctx, GCtx, Term};
use log::info;
use opt::Opt;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

impl Opt {
    fn print(&self, tm: &Term) -> String {
        let ctx = Ctx::new();
        let show = tm.show(&ctx);
        let show = if self.erase { show.erased() } else { show };
        show.to_string()
    }
}

fn process(name: &str, src: &str, opt: &Opt) -> Result<(), Error> {
    info!("process {}", name);
    let (tm, gctx) = GCtx::parse(src)?;
    if opt.no_check {
        return Ok(());
    }

    if opt.defs {
        for g in gctx.iter() {
            info!("check {}", g.name());
            let ty = g.infer()?;
            println!("{} : {}", g.name(), opt.print(&ty.norm(false)));
        }
    }

    let ty = tm.infer(&Ctx::new())?;
    println!(": {}", opt.print(&ty.norm(false)));
    if opt.norm {
        println!("= {}", opt.print(&tm.norm(opt.unfold)));
    }
    Ok(())
}

fn run(opt: &Opt) -> Result<(), Error> {
    for pr in path_read::path_reads(&opt.files) {
        let (name, src) = pr?;
        process(&name, &src, opt)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let opt = Opt::parse();
    if let Err(e) = run(&opt) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
