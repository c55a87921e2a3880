use l5x::{Project, ProjectConfig};

/// A single-language export exercising every tag and module flavour.
pub const PROJECT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<RSLogix5000Content SchemaRevision="1.0" SoftwareRevision="20.01" TargetName="plc" TargetType="Controller" ContainsContext="false" ExportOptions="DecoratedData ForceProtectedEncoding AllProjDocTrans">
<Controller Use="Target" Name="plc" ProcessorType="1756-L71S" MajorRev="20" MinorRev="11" CommPath="AB_ETH-1\10.0.0.1">
<DataTypes>
<DataType Name="Recipe" Family="NoFamily" Class="User">
<Members>
<Member Name="ZZZZZZZZZZRecipe0" DataType="SINT" Dimension="0" Radix="Decimal" Hidden="true" ExternalAccess="Read/Write"/>
<Member Name="Enable" DataType="BIT" Dimension="0" Radix="Decimal" Hidden="false" Target="ZZZZZZZZZZRecipe0" BitNumber="0" ExternalAccess="Read/Write"/>
<Member Name="Speed" DataType="REAL" Dimension="0" Radix="Float" Hidden="false" ExternalAccess="Read/Write"/>
<Member Name="Steps" DataType="DINT" Dimension="3" Radix="Decimal" Hidden="false" ExternalAccess="Read/Write"/>
<Member Name="Delay" DataType="TIMER" Dimension="0" Radix="NullType" Hidden="false" ExternalAccess="Read/Write"/>
</Members>
</DataType>
</DataTypes>
<Modules>
<Module Name="Local" CatalogNumber="1756-L71S" Vendor="1" ProductType="14" ProductCode="146" Major="20" Minor="11" ParentModule="Local" ParentModPortId="1" Inhibited="false" MajorFault="true" SafetyNetwork="16#0000_4544_03d1_e91a">
<EKey State="Disabled"/>
<Ports>
<Port Id="1" Address="0" Type="ICP" Upstream="false">
<Bus Size="10"/>
</Port>
</Ports>
</Module>
<Module Name="ENBT" CatalogNumber="1756-ENBT/A" Vendor="1" ProductType="12" ProductCode="58" Major="6" Minor="1" ParentModule="Local" ParentModPortId="1" Inhibited="true" MajorFault="false">
<EKey State="CompatibleModule"/>
<Ports>
<Port Id="1" Address="1" Type="ICP" Upstream="true"/>
<Port Id="2" Type="Ethernet" Upstream="false" NATActualAddress="192.168.1.10">
<Bus/>
</Port>
</Ports>
</Module>
<Module Name="SafetyIO" CatalogNumber="1756-IB16S" Vendor="1" ProductType="7" ProductCode="60" Major="1" Minor="1" ParentModule="Local" ParentModPortId="1" Inhibited="false" MajorFault="false">
<EKey State="ExactMatch"/>
<Ports>
<Port Id="1" Address="3" Type="ICP" Upstream="true" SafetyNetwork="16#0000_1337_d00d_0100"/>
<Port Id="2" Type="Ethernet" Upstream="false" SafetyNetwork="16#0000_1337_d00d_0101"/>
</Ports>
</Module>
</Modules>
<Tags>
<Tag Name="count" TagType="Base" DataType="DINT" Radix="Decimal" Constant="false" ExternalAccess="Read/Write">
<Description>
<![CDATA[Cycle counter]]>
</Description>
<Data>00 00 00 00</Data>
<Data Format="Decorated">
<DataValue DataType="DINT" Radix="Decimal" Value="0"/>
</Data>
</Tag>
<Tag Name="flags" TagType="Base" DataType="INT" Radix="Hex" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<DataValue DataType="INT" Radix="Hex" Value="16#0000"/>
</Data>
</Tag>
<Tag Name="small" TagType="Base" DataType="SINT" Radix="Decimal" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<DataValue DataType="SINT" Radix="Decimal" Value="0"/>
</Data>
</Tag>
<Tag Name="level" TagType="Base" DataType="REAL" Radix="Float" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<DataValue DataType="REAL" Radix="Float" Value="1.5"/>
</Data>
</Tag>
<Tag Name="gain" TagType="Base" DataType="REAL" Radix="Exponential" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<DataValue DataType="REAL" Radix="Exponential" Value="2.50000000e-001"/>
</Data>
</Tag>
<Tag Name="running" TagType="Base" DataType="BOOL" Radix="Decimal" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<DataValue DataType="BOOL" Radix="Decimal" Value="0"/>
</Data>
</Tag>
<Tag Name="delay" TagType="Base" DataType="TIMER" Constant="false" ExternalAccess="Read/Write">
<Comments>
<Comment Operand=".PRE">
<![CDATA[delay preset]]>
</Comment>
</Comments>
<Data Format="Decorated">
<Structure DataType="TIMER">
<DataValueMember Name="PRE" DataType="DINT" Radix="Decimal" Value="1000"/>
<DataValueMember Name="ACC" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="EN" DataType="BOOL" Value="0"/>
<DataValueMember Name="TT" DataType="BOOL" Value="0"/>
<DataValueMember Name="DN" DataType="BOOL" Value="0"/>
</Structure>
</Data>
</Tag>
<Tag Name="backup_delay" TagType="Base" DataType="TIMER" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<Structure DataType="TIMER">
<DataValueMember Name="PRE" DataType="DINT" Radix="Decimal" Value="2000"/>
<DataValueMember Name="ACC" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="EN" DataType="BOOL" Value="0"/>
<DataValueMember Name="TT" DataType="BOOL" Value="0"/>
<DataValueMember Name="DN" DataType="BOOL" Value="0"/>
</Structure>
</Data>
</Tag>
<Tag Name="recipe" TagType="Base" DataType="Recipe" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<Structure DataType="Recipe">
<DataValueMember Name="Enable" DataType="BOOL" Value="1"/>
<DataValueMember Name="Speed" DataType="REAL" Radix="Float" Value="0.0"/>
<ArrayMember Name="Steps" DataType="DINT" Dimensions="3" Radix="Decimal">
<Element Index="[0]" Value="10"/>
<Element Index="[1]" Value="20"/>
<Element Index="[2]" Value="30"/>
</ArrayMember>
<StructureMember Name="Delay" DataType="TIMER">
<DataValueMember Name="PRE" DataType="DINT" Radix="Decimal" Value="500"/>
<DataValueMember Name="ACC" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="EN" DataType="BOOL" Value="0"/>
<DataValueMember Name="TT" DataType="BOOL" Value="0"/>
<DataValueMember Name="DN" DataType="BOOL" Value="0"/>
</StructureMember>
</Structure>
</Data>
</Tag>
<Tag Name="values" TagType="Base" DataType="DINT" Dimensions="5" Radix="Decimal" Constant="false" ExternalAccess="Read/Write">
<Comments>
<Comment Operand="[1]">
<![CDATA[second value]]>
</Comment>
</Comments>
<Data Format="Decorated">
<Array DataType="DINT" Dimensions="5" Radix="Decimal">
<Element Index="[0]" Value="0"/>
<Element Index="[1]" Value="1"/>
<Element Index="[2]" Value="2"/>
<Element Index="[3]" Value="3"/>
<Element Index="[4]" Value="4"/>
</Array>
</Data>
</Tag>
<Tag Name="grid" TagType="Base" DataType="INT" Dimensions="2 3" Radix="Decimal" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<Array DataType="INT" Dimensions="2,3" Radix="Decimal">
<Element Index="[0,0]" Value="0"/>
<Element Index="[0,1]" Value="0"/>
<Element Index="[0,2]" Value="0"/>
<Element Index="[1,0]" Value="0"/>
<Element Index="[1,1]" Value="0"/>
<Element Index="[1,2]" Value="0"/>
</Array>
</Data>
</Tag>
<Tag Name="timers" TagType="Base" DataType="TIMER" Dimensions="2" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<Array DataType="TIMER" Dimensions="2">
<Element Index="[0]">
<Structure DataType="TIMER">
<DataValueMember Name="PRE" DataType="DINT" Radix="Decimal" Value="100"/>
<DataValueMember Name="ACC" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="EN" DataType="BOOL" Value="0"/>
<DataValueMember Name="TT" DataType="BOOL" Value="0"/>
<DataValueMember Name="DN" DataType="BOOL" Value="0"/>
</Structure>
</Element>
<Element Index="[1]">
<Structure DataType="TIMER">
<DataValueMember Name="PRE" DataType="DINT" Radix="Decimal" Value="200"/>
<DataValueMember Name="ACC" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="EN" DataType="BOOL" Value="0"/>
<DataValueMember Name="TT" DataType="BOOL" Value="0"/>
<DataValueMember Name="DN" DataType="BOOL" Value="0"/>
</Structure>
</Element>
</Array>
</Data>
</Tag>
<Tag Name="alias_timer" TagType="Alias" Radix="NullType" AliasFor="delay" ExternalAccess="Read/Write">
<Description>
<![CDATA[alias to delay]]>
</Description>
<Comments>
<Comment Operand=".PRE">
<![CDATA[preset comment]]>
</Comment>
</Comments>
</Tag>
<Tag Name="remote_data" TagType="Consumed" DataType="DINT" Radix="Decimal" ExternalAccess="Read/Write">
<ConsumeInfo Producer="other_plc" RemoteTag="shared" RemoteFile="0" RPI="20" Unicast="false"/>
<Data Format="Decorated">
<DataValue DataType="DINT" Radix="Decimal" Value="0"/>
</Data>
</Tag>
<Tag Name="valve" TagType="Base" DataType="AOI_Valve" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<Structure DataType="AOI_Valve">
<DataValueMember Name="EnableIn" DataType="BOOL" Value="1"/>
<DataValueMember Name="Cmd" DataType="DINT" Radix="Decimal" Value="0"/>
</Structure>
</Data>
</Tag>
<Tag Name="broken" TagType="Base" DataType="Missing_UDT" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated"/>
</Tag>
</Tags>
<Programs>
<Program Name="MainProgram" TestEdits="false" MainRoutineName="MainRoutine" Disabled="false">
<Tags>
<Tag Name="local_counter" TagType="Base" DataType="COUNTER" Constant="false" ExternalAccess="Read/Write">
<Data Format="Decorated">
<Structure DataType="COUNTER">
<DataValueMember Name="PRE" DataType="DINT" Radix="Decimal" Value="3"/>
<DataValueMember Name="ACC" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="CU" DataType="BOOL" Value="0"/>
<DataValueMember Name="CD" DataType="BOOL" Value="0"/>
<DataValueMember Name="DN" DataType="BOOL" Value="0"/>
<DataValueMember Name="OV" DataType="BOOL" Value="0"/>
<DataValueMember Name="UN" DataType="BOOL" Value="0"/>
</Structure>
</Data>
</Tag>
</Tags>
</Program>
</Programs>
</Controller>
</RSLogix5000Content>
"#;

/// A multi-language export with English and German descriptions.
pub const MULTI_LANGUAGE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<RSLogix5000Content SchemaRevision="1.0" SoftwareRevision="30.00" TargetName="plc" TargetType="Controller" CurrentLanguage="en-US">
<Controller Use="Target" Name="plc">
<Tags>
<Tag Name="motor" TagType="Base" DataType="TIMER" Constant="false" ExternalAccess="Read/Write">
<Description>
<LocalizedDescription Lang="en-US">
<![CDATA[Motor delay]]>
</LocalizedDescription>
<LocalizedDescription Lang="de-DE">
<![CDATA[Motorverzoegerung]]>
</LocalizedDescription>
</Description>
<Comments>
<Comment Operand=".PRE">
<LocalizedComment Lang="en-US">
<![CDATA[Preset]]>
</LocalizedComment>
</Comment>
</Comments>
<Data Format="Decorated">
<Structure DataType="TIMER">
<DataValueMember Name="PRE" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="ACC" DataType="DINT" Radix="Decimal" Value="0"/>
<DataValueMember Name="EN" DataType="BOOL" Value="0"/>
<DataValueMember Name="TT" DataType="BOOL" Value="0"/>
<DataValueMember Name="DN" DataType="BOOL" Value="0"/>
</Structure>
</Data>
</Tag>
</Tags>
</Controller>
</RSLogix5000Content>
"#;

/// Load the single-language fixture
pub fn project() -> Project {
    Project::parse(PROJECT).expect("fixture should parse")
}

/// Load the multi-language fixture with the given configuration
pub fn multi_language_project(config: ProjectConfig) -> Project {
    Project::parse_with_config(MULTI_LANGUAGE, config).expect("fixture should parse")
}

/// Serialize and parse again, as a write followed by a fresh load would
pub fn reload(project: &Project) -> Project {
    let xml = project.to_xml_string().expect("project should serialize");
    Project::parse_with_config(&xml, project.config().clone()).expect("output should parse")
}

/// The slice of `xml` covering the tag called `name`
pub fn tag_xml<'a>(xml: &'a str, name: &str) -> &'a str {
    let start = xml
        .find(&format!("<Tag Name=\"{name}\""))
        .expect("tag should be present");
    let end = xml[start..]
        .find("</Tag>")
        .map_or(xml.len(), |offset| start + offset);
    &xml[start..end]
}
