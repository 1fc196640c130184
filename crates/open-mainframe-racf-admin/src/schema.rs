//! Per-entity trait tables: which segments an entity has, which traits each
//! segment accepts, and the wire attribute each trait is sent as.

use crate::segment::TraitTable;
use crate::types::EntityKind;

type Pairs = &'static [(&'static str, &'static str)];

/// Base traits shared by data set and general resource profiles.
const COMMON_DATASET_GENERIC_BASE: Pairs = &[
    ("aclcnt", "racf:aclcnt"),
    ("aclacnt", "racf:aclacnt"),
    ("aclacs", "racf:aclacs"),
    ("aclid", "racf:aclid"),
    ("acl2cnt", "racf:acl2cnt"),
    ("acl2acnt", "racf:acl2acnt"),
    ("acl2acs", "racf:acl2acs"),
    ("acl2cond", "racf:acl2cond"),
    ("acl2ent", "racf:acl2ent"),
    ("acl2id", "racf:acl2id"),
    ("acsaltr", "racf:acsaltr"),
    ("acscntl", "racf:acscntl"),
    ("acsread", "racf:acsread"),
    ("acsupdt", "racf:acsupdt"),
    ("all", "racf:all"),
    ("audaltr", "racf:audaltr"),
    ("audcntl", "racf:audcntl"),
    ("audnone", "racf:audnone"),
    ("audread", "racf:audread"),
    ("audupdt", "racf:audupdt"),
    ("authuser", "racf:authuser"),
    ("fvolume", "racf:fvolume"),
    ("gaudaltr", "racf:gaudaltr"),
    ("gaudcntl", "racf:gaudcntl"),
    ("gaudnone", "racf:gaudnone"),
    ("gaudread", "racf:gaudread"),
    ("gaudupdt", "racf:gaudupdt"),
    ("generic", "racf:generic"),
];

const USER_BASE: Pairs = &[
    ("adsp", "racf:adsp"),
    ("auditor", "racf:auditor"),
    ("auth", "racf:auth"),
    ("category", "racf:category"),
    ("clauth", "racf:clauth"),
    ("dfltgrp", "racf:defgroup"),
    ("group", "racf:group"),
    ("grpacc", "racf:grpacc"),
    ("hasphrase", "racf:hasphras"),
    ("haspwd", "racf:haspwd"),
    ("model", "racf:model"),
    ("name", "name"),
    ("oidcard", "racf:oidcard"),
    ("operations", "racf:oper"),
    ("owner", "racf:owner"),
    ("passint", "racf:passint"),
    ("password", "racf:password"),
    ("phrase", "racf:phrase"),
    ("restrict", "racf:rest"),
    ("resume", "racf:resume"),
    ("revoke", "racf:revoke"),
    ("seclabel", "racf:seclabel"),
    ("seclevel", "racf:seclevel"),
    ("special", "racf:special"),
    ("uacc", "racf:uacc"),
    ("uaudit", "racf:uaudit"),
    ("whendays", "whendays"),
    ("whentime", "whentime"),
];

const USER_CICS: Pairs = &[
    ("opclass", "racf:opclass"),
    ("opident", "opident"),
    ("opprty", "opprty"),
    ("rslkey", "racf:rslkey"),
    ("timeout", "timeout"),
    ("tslkey", "racf:tslkey"),
    ("xrfsoff", "force"),
];

const DFP: Pairs = &[
    ("dataappl", "dataappl"),
    ("dataclas", "dataclas"),
    ("mgmtclas", "mgmtclas"),
    ("storclas", "storclas"),
];

const USER_LANGUAGE: Pairs = &[("primary", "primary"), ("secondary", "secondary")];

const USER_OMVS: Pairs = &[
    ("assize", "assize"),
    ("autouid", "racf:autouid"),
    ("cputime", "cputime"),
    ("fileproc", "fileproc"),
    ("home", "home"),
    ("memlimit", "memlimit"),
    ("mmaparea", "mmaparea"),
    ("procuser", "procuser"),
    ("program", "pgm"),
    ("shared", "racf:shared"),
    ("shmemmax", "shmemmax"),
    ("threads", "threads"),
    ("uid", "uid"),
];

const USER_OVM: Pairs = &[
    ("fsroot", "racf:fsroot"),
    ("vhome", "racf:vhome"),
    ("vprogram", "racf:vprogram"),
    ("vuid", "racf:vuid"),
];

const USER_TSO: Pairs = &[
    ("account", "acctnum"),
    ("command", "command"),
    ("dest", "dest"),
    ("hldclass", "holdclass"),
    ("jobclass", "jobclass"),
    ("maxsize", "maxsize"),
    ("msgclass", "msgclass"),
    ("proc", "proc"),
    ("seclabel", "racf:seclabel"),
    ("size", "size"),
    ("sysout", "sysclass"),
    ("unit", "unit"),
    ("userdata", "userdata"),
];

const GROUP_BASE: Pairs = &[
    ("connects", "racf:connects"),
    ("gauth", "racf:gauth"),
    ("guserid", "racf:guserid"),
    ("creatdat", "racf:creatdat"),
    ("data", "racf:data"),
    ("model", "racf:model"),
    ("owner", "racf:owner"),
    ("subgroup", "racf:subgroup"),
    ("supgroup", "racf:supgroup"),
    ("termuacc", "racf:termuacc"),
    ("universl", "racf:universl"),
];

const GROUP_OMVS: Pairs = &[
    ("autogid", "racf:autogid"),
    ("gid", "gid"),
    ("shared", "racf:shared"),
];

const GROUP_OVM: Pairs = &[("gid", "racf:gid")];

const TME: Pairs = &[("roles", "racf:roles")];

const CONNECTION_BASE: Pairs = &[
    ("adsp", "racf:adsp"),
    ("auditor", "racf:auditor"),
    ("auth", "racf:auth"),
    ("group", "racf:group"),
    ("grpacc", "racf:grpacc"),
    ("operations", "racf:operations"),
    ("owner", "racf:owner"),
    ("resume", "racf:resume"),
    ("revoke", "racf:revoke"),
    ("special", "racf:special"),
    ("uacc", "racf:uacc"),
];

const DATASET_BASE: Pairs = &[
    ("altvol", "racf:altvol"),
    ("category", "racf:category"),
    ("creatgrp", "racf:creatgrp"),
    ("data", "racf:data"),
    ("dsns", "racf:dsns"),
    ("dstype", "racf:dstype"),
    ("erase", "racf:erase"),
    ("fclass", "racf:fclass"),
    ("fgeneric", "racf:fgeneric"),
    ("fileseq", "racf:fileseq"),
    ("from", "racf:from"),
    ("groupnm", "racf:groupnm"),
    ("history", "racf:history"),
    ("id", "racf:id"),
    ("lchgdat", "racf:lchgdat"),
    ("level", "racf:level"),
    ("lrefdat", "racf:lrefdat"),
    ("model", "racf:model"),
    ("noracf", "racf:noracf"),
    ("notify", "racf:notify"),
    ("owner", "racf:owner"),
    ("prefix", "racf:prefix"),
    ("profile", "racf:profile"),
    ("raudit", "racf:raudit"),
    ("retpd", "racf:retpd"),
    ("rgaudit", "racf:rgaudit"),
    ("seclabel", "racf:seclabel"),
    ("seclevel", "racf:seclevel"),
    ("setonly", "racf:setonly"),
    ("stats", "racf:stats"),
    ("tape", "racf:tape"),
    ("uacc", "racf:uacc"),
    ("unit", "racf:unit"),
    ("volume", "racf:volume"),
    ("volser", "racf:volser"),
    ("warning", "racf:warning"),
];

const DATASET_DFP: Pairs = &[("resowner", "racf:resowner")];

const RESOURCE_BASE: Pairs = &[
    ("appldata", "racf:appldata"),
    ("audit", "racf:audit"),
    ("category", "racf:category"),
    ("creatdat", "racf:creatdat"),
    ("data", "racf:data"),
    ("lchgdat", "racf:lchgdat"),
    ("level", "racf:level"),
    ("lrefdat", "racf:lrefdat"),
    ("member", "racf:member"),
    ("notify", "racf:notify"),
    ("owner", "racf:owner"),
    ("raudit", "racf:raudit"),
    ("rgaudit", "racf:rgaudit"),
    ("seclabel", "racf:seclabel"),
    ("seclevel", "racf:seclevel"),
    ("singldsn", "racf:singldsn"),
    ("stats", "racf:stats"),
    ("timezone", "racf:timezone"),
    ("tvtoc", "racf:tvtoc"),
    ("uacc", "racf:uacc"),
    ("warning", "racf:warning"),
    ("whendays", "racf:whendays"),
    ("whentime", "racf:whentime"),
];

const RESOURCE_DLFDATA: Pairs = &[("jobname", "racf:jobname"), ("retain", "racf:retain")];

const RESOURCE_KERB: Pairs = &[
    ("encrypt", "racf:encrypt"),
    ("kerbname", "racf:kerbname"),
    ("keyfrom", "racf:keyfrom"),
    ("keyvers", "racf:keyvers"),
    ("maxtktlf", "racf:maxtktlf"),
    ("mintklife", "racf:mintklife"),
    ("password", "racf:password"),
];

const RESOURCE_PROXY: Pairs = &[
    ("binddn", "racf:binddn"),
    ("bindpw", "racf:bindpw"),
    ("ldaphost", "racf:ldaphost"),
];

const RESOURCE_SESSION: Pairs = &[
    ("convsec", "racf:convsec"),
    ("interval", "racf:interval"),
    ("lock", "racf:lock"),
    ("sesskey", "racf:sesskey"),
];

const RESOURCE_SSIGNON: Pairs = &[
    ("keycrypt", "racf:keycrypt"),
    ("keymask", "racf:keymask"),
    ("ptkeylab", "racf:ptkeylab"),
    ("pttype", "racf:pttype"),
    ("pttimeo", "racf:pttimeo"),
    ("ptreplay", "racf:ptreplay"),
];

const RESOURCE_STDATA: Pairs = &[
    ("group", "racf:stgroup"),
    ("privlege", "racf:privlege"),
    ("trace", "racf:trace"),
    ("trusted", "racf:trusted"),
    ("user", "racf:stuser"),
];

const SETROPTS_BASE: Pairs = &[
    ("addcreat", "racf:addcreat"),
    ("adsp", "racf:adsp"),
    ("applaudt", "racf:applaudt"),
    ("audit", "racf:audit"),
    ("catdsns", "racf:catdsns"),
    ("classact", "racf:classact"),
    ("classtat", "racf:classtat"),
    ("cmdviol", "racf:cmdviol"),
    ("compmode", "racf:compmode"),
    ("egn", "racf:egn"),
    ("erase", "racf:erase"),
    ("eraseall", "racf:eraseall"),
    ("erasesec", "racf:erasesec"),
    ("gencmd", "racf:gencmd"),
    ("generic", "racf:generic"),
    ("genlist", "racf:genlist"),
    ("genowner", "racf:genowner"),
    ("global", "racf:global"),
    ("grplist", "racf:grplist"),
    ("history", "racf:history"),
    ("inactive", "racf:inactive"),
    ("initstat", "racf:initstat"),
    ("interval", "racf:interval"),
    ("jesbatch", "racf:jesbatch"),
    ("jesearly", "racf:jesearly"),
    ("jesnje", "racf:jesnje"),
    ("jesundef", "racf:jesundef"),
    ("jesxbm", "racf:jesxbm"),
    ("kerblvl", "racf:kerblvl"),
    ("list", "racf:list"),
    ("logalwys", "racf:logalwys"),
    ("logdeflt", "racf:logdeflt"),
    ("logfail", "racf:logfail"),
    ("lognever", "racf:lognever"),
    ("logsucc", "racf:logsucc"),
    ("minchang", "racf:minchang"),
    ("mixdcase", "racf:mixdcase"),
    ("mlactive", "racf:mlactive"),
    ("mlfs", "racf:mlfs"),
    ("mlipc", "racf:mlipc"),
    ("mlnames", "racf:mlnames"),
    ("mlquiet", "racf:mlquiet"),
    ("mls", "racf:mls"),
    ("mlstable", "racf:mlstable"),
    ("model", "racf:model"),
    ("modgdg", "racf:modgdg"),
    ("modgroup", "racf:modgroup"),
    ("moduser", "racf:moduser"),
    ("operaudt", "racf:operaudt"),
    ("phrint", "racf:phrint"),
    ("prefix", "racf:prefix"),
    ("primlang", "racf:primlang"),
    ("protall", "racf:protall"),
    ("pwdalg", "racf:pwdalg"),
    ("pwdspec", "racf:pwdspec"),
    ("raclist", "racf:raclist"),
    ("realdsn", "racf:realdsn"),
    ("retpd", "racf:retpd"),
    ("rules", "racf:rules"),
    ("rvarswpw", "racf:rvarswpw"),
    ("rvarstpw", "racf:rvarstpw"),
    ("saudit", "racf:saudit"),
    ("seclabct", "racf:seclabct"),
    ("seclang", "racf:seclang"),
    ("sessint", "racf:sessint"),
    ("slabaudt", "racf:slabaudt"),
    ("slbysys", "racf:slbysys"),
    ("slevaudt", "racf:slevaudt"),
    ("tapedsn", "racf:tapedsn"),
    ("terminal", "racf:terminal"),
    ("warning", "racf:warning"),
    ("whenprog", "racf:whenprog"),
];

const PERMISSION_BASE: Pairs = &[
    ("access", "racf:access"),
    ("class", "racf:class"),
    ("delete", "racf:delete"),
    ("fclass", "racf:fclass"),
    ("fgeneric", "racf:fgeneric"),
    ("fprofile", "racf:fprofile"),
    ("fvolume", "racf:fvolume"),
    ("generic", "racf:generic"),
    ("id", "authid"),
    ("profile", "racf:profile"),
    ("reset", "racf:reset"),
    ("volume", "racf:volume"),
    ("whenappc", "racf:whenappc"),
    ("whencons", "racf:whencons"),
    ("whenjes", "racf:whenjes"),
    ("whenprog", "racf:whenprog"),
    ("whenserv", "racf:whenserv"),
    ("whensms", "racf:whensms"),
    ("whensqlr", "racf:whensqlr"),
    ("whensys", "racf:whensys"),
    ("whenterm", "racf:whenterm"),
];

fn with_common(specific: Pairs) -> Vec<(&'static str, &'static str)> {
    COMMON_DATASET_GENERIC_BASE
        .iter()
        .chain(specific.iter())
        .copied()
        .collect()
}

/// User profile segments.
pub fn user_traits() -> TraitTable {
    TraitTable::new()
        .with_segment("base", USER_BASE)
        .with_segment("cics", USER_CICS)
        .with_segment("dfp", DFP)
        .with_segment("language", USER_LANGUAGE)
        .with_segment("omvs", USER_OMVS)
        .with_segment("ovm", USER_OVM)
        .with_segment("tso", USER_TSO)
}

/// Group profile segments.
pub fn group_traits() -> TraitTable {
    TraitTable::new()
        .with_segment("base", GROUP_BASE)
        .with_segment("dfp", DFP)
        .with_segment("omvs", GROUP_OMVS)
        .with_segment("ovm", GROUP_OVM)
        .with_segment("tme", TME)
}

/// Group connection traits.
pub fn connection_traits() -> TraitTable {
    TraitTable::new().with_segment("base", CONNECTION_BASE)
}

/// Data set profile segments.
pub fn dataset_traits() -> TraitTable {
    TraitTable::new()
        .with_segment("base", &with_common(DATASET_BASE))
        .with_segment("dfp", DATASET_DFP)
        .with_segment("tme", TME)
}

/// General resource profile segments.
pub fn resource_traits() -> TraitTable {
    TraitTable::new()
        .with_segment("base", &with_common(RESOURCE_BASE))
        .with_segment("dlfdata", RESOURCE_DLFDATA)
        .with_segment("kerb", RESOURCE_KERB)
        .with_segment("proxy", RESOURCE_PROXY)
        .with_segment("session", RESOURCE_SESSION)
        .with_segment("ssignon", RESOURCE_SSIGNON)
        .with_segment("stdata", RESOURCE_STDATA)
        .with_segment("tme", TME)
}

/// System-wide option traits.
pub fn setropts_traits() -> TraitTable {
    TraitTable::new().with_segment("base", SETROPTS_BASE)
}

/// Access list (PERMIT) traits.
pub fn permission_traits() -> TraitTable {
    TraitTable::new().with_segment("base", PERMISSION_BASE)
}

/// The default trait table for an entity kind.
pub fn traits_for(entity: EntityKind) -> TraitTable {
    match entity {
        EntityKind::User => user_traits(),
        EntityKind::Group => group_traits(),
        EntityKind::Connection => connection_traits(),
        EntityKind::DataSet => dataset_traits(),
        EntityKind::Resource => resource_traits(),
        EntityKind::SystemSettings => setropts_traits(),
        EntityKind::Permission => permission_traits(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_segment_is_first() {
        for entity in [
            EntityKind::User,
            EntityKind::Group,
            EntityKind::Connection,
            EntityKind::DataSet,
            EntityKind::Resource,
            EntityKind::SystemSettings,
            EntityKind::Permission,
        ] {
            assert_eq!(traits_for(entity).segment_names().next(), Some("base"));
        }
    }

    #[test]
    fn test_group_wire_names() {
        let table = group_traits();
        assert_eq!(table.lookup("base", "owner"), Some("racf:owner"));
        assert_eq!(table.lookup("omvs", "gid"), Some("gid"));
        assert_eq!(table.lookup("ovm", "gid"), Some("racf:gid"));
        assert_eq!(table.lookup("dfp", "storclas"), Some("storclas"));
        assert_eq!(table.lookup("tme", "roles"), Some("racf:roles"));
    }

    #[test]
    fn test_dataset_and_resource_share_common_base() {
        for table in [dataset_traits(), resource_traits()] {
            assert_eq!(table.lookup("base", "aclcnt"), Some("racf:aclcnt"));
            assert_eq!(table.lookup("base", "generic"), Some("racf:generic"));
            assert_eq!(table.lookup("base", "uacc"), Some("racf:uacc"));
        }
        assert_eq!(dataset_traits().lookup("base", "volume"), Some("racf:volume"));
        assert_eq!(resource_traits().lookup("base", "volume"), None);
    }

    #[test]
    fn test_user_renamed_attributes() {
        let table = user_traits();
        assert_eq!(table.lookup("base", "dfltgrp"), Some("racf:defgroup"));
        assert_eq!(table.lookup("omvs", "program"), Some("pgm"));
        assert_eq!(table.lookup("tso", "account"), Some("acctnum"));
    }
}
