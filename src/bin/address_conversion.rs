//! Converts a sector address between its logical, physical and cluster forms.

use clap::{ArgGroup, CommandFactory, Parser, error::ErrorKind};
use image_forensics::constants::SECTOR_SIZE;
use image_forensics::conversion::address::{
    AddressConverter, AddressKind, ClusterLayout, KnownAddress,
};

#[derive(Debug, Parser)]
#[command(
    name = "address_conversion",
    version,
    about = "Converts between logical, physical and cluster addresses"
)]
#[command(group(ArgGroup::new("target").required(true).args(["logical", "physical", "cluster"])))]
#[command(group(
    ArgGroup::new("known")
        .required(true)
        .args(["logical_known", "physical_known", "cluster_known"])
))]
struct Args {
    /// Calculate the logical address from either the cluster address or the physical address
    #[arg(short = 'L', long)]
    logical: bool,
    /// Calculate the physical address from either the cluster address or the logical address
    #[arg(short = 'P', long)]
    physical: bool,
    /// Calculate the cluster address from either the logical address or the physical address
    #[arg(short = 'C', long)]
    cluster: bool,
    /// Physical address (sector number) of the start of the partition
    #[arg(short = 'b', long, value_name = "offset", default_value_t = 0)]
    partition_start: u64,
    /// Return the byte address of the calculated value instead of a sector number
    #[arg(short = 'B', long)]
    byte_address: bool,
    /// Bytes per sector used with -B
    #[arg(short = 's', long, value_name = "bytes", default_value_t = SECTOR_SIZE as u64)]
    sector_size: u64,
    /// Known logical address
    #[arg(short = 'l', long, value_name = "address")]
    logical_known: Option<u64>,
    /// Known physical address
    #[arg(short = 'p', long, value_name = "address")]
    physical_known: Option<u64>,
    /// Known cluster address; -k, -r, -t and -f must be provided with this option
    #[arg(short = 'c', long, value_name = "address")]
    cluster_known: Option<u64>,
    /// Number of sectors per cluster
    #[arg(short = 'k', long, value_name = "sectors")]
    cluster_size: Option<u64>,
    /// Number of reserved sectors in the partition
    #[arg(short = 'r', long, value_name = "sectors")]
    reserved: Option<u64>,
    /// Number of FAT tables, usually 2
    #[arg(short = 't', long, value_name = "tables")]
    fat_tables: Option<u64>,
    /// Length of each FAT table in sectors
    #[arg(short = 'f', long, value_name = "sectors")]
    fat_length: Option<u64>,
}

impl Args {
    fn target(&self) -> AddressKind {
        if self.logical {
            AddressKind::Logical
        } else if self.physical {
            AddressKind::Physical
        } else {
            AddressKind::Cluster
        }
    }

    fn known(&self) -> Option<KnownAddress> {
        self.logical_known
            .map(KnownAddress::Logical)
            .or(self.physical_known.map(KnownAddress::Physical))
            .or(self.cluster_known.map(KnownAddress::Cluster))
    }
}

fn main() {
    let args = Args::parse();
    stderrlog::new().module(module_path!()).init().unwrap();

    let Some(known) = args.known() else {
        Args::command()
            .error(ErrorKind::MissingRequiredArgument, "one of -l, -p or -c must be provided")
            .exit()
    };

    let converter = AddressConverter::new(
        args.partition_start,
        args.sector_size,
        ClusterLayout {
            cluster_size: args.cluster_size,
            reserved: args.reserved,
            fat_tables: args.fat_tables,
            fat_length: args.fat_length,
        },
    );

    match converter.convert(known, args.target(), args.byte_address) {
        Ok(address) => println!("{address}"),
        Err(e) => Args::command().error(ErrorKind::ValueValidation, e).exit(),
    }
}
